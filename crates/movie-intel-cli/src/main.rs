//! Movie Intelligence CLI
//!
//! The `movie-intel` command runs the four-agent report pipeline for one
//! movie title and writes the resulting report artifact to disk.
//!
//! ## Commands
//!
//! - `analyze`: fetch metadata, run the pipeline, export the report
//! - `crew`: show the agent profiles a run would use

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};

use movie_intel_core::{
    AgentProfile, AgentRole, MoviePipeline, PipelineConfig, VerdictOutcome,
};
use movie_intel_providers::{GeminiAgent, OmdbClient, ProviderConfig, TextFileSink, TmdbClient};

#[derive(Parser)]
#[command(name = "movie-intel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-agent movie report pipeline", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a movie and produce a validated report
    Analyze {
        /// Movie title to look up
        title: String,

        /// Optional question about the movie
        #[arg(short, long)]
        question: Option<String>,

        /// Directory to write the report artifact into
        #[arg(short, long, default_value = "reports")]
        output_dir: PathBuf,

        /// Backend model identifier
        #[arg(long, default_value = "gemini-2.5-flash")]
        model: String,

        /// Per-call timeout for agent invocations, in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// OMDb API key
        #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
        omdb_api_key: String,

        /// TMDb API key (optional; financial fields degrade to unknown
        /// without it)
        #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
        tmdb_api_key: Option<String>,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        gemini_api_key: String,
    },

    /// Show the agent profiles a run would use
    Crew {
        /// Backend model identifier
        #[arg(long, default_value = "gemini-2.5-flash")]
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    movie_intel_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Analyze {
            title,
            question,
            output_dir,
            model,
            timeout_secs,
            omdb_api_key,
            tmdb_api_key,
            gemini_api_key,
        } => {
            let mut config = ProviderConfig::new(&omdb_api_key, &gemini_api_key)
                .with_model(&model)
                .with_request_timeout(Duration::from_secs(timeout_secs));
            if let Some(key) = &tmdb_api_key {
                config = config.with_tmdb_key(key);
            }
            cmd_analyze(&config, &title, question.as_deref(), &output_dir, timeout_secs).await
        }
        Commands::Crew { model } => cmd_crew(&model),
    }
}

/// Fetch source data, run the pipeline, print the results in order, and
/// export the artifact.
async fn cmd_analyze(
    config: &ProviderConfig,
    title: &str,
    question: Option<&str>,
    output_dir: &PathBuf,
    timeout_secs: u64,
) -> Result<()> {
    anyhow::ensure!(!title.trim().is_empty(), "movie title must not be empty");

    // Source data
    let omdb = OmdbClient::new(config);
    let metadata = omdb
        .lookup(title)
        .await
        .with_context(|| format!("fetching metadata for '{title}'"))?;

    let financials = match TmdbClient::new(config) {
        Some(tmdb) => tmdb.financials(title).await,
        None => {
            info!("no TMDb key configured, financial fields will be unknown");
            None
        }
    };

    // One agent per profile, all bound to the configured model
    let crew = AgentProfile::standard_crew(&config.model);
    let agent_for = |role: AgentRole| -> Result<Arc<GeminiAgent>> {
        let profile = crew
            .iter()
            .find(|p| p.role == role)
            .cloned()
            .with_context(|| format!("no profile for role '{role}'"))?;
        Ok(Arc::new(GeminiAgent::new(profile, config)))
    };
    let pipeline = MoviePipeline::new(
        agent_for(AgentRole::Analyzer)?,
        agent_for(AgentRole::Answerer)?,
        agent_for(AgentRole::Validator)?,
        agent_for(AgentRole::Composer)?,
        PipelineConfig {
            agent_timeout: Duration::from_secs(timeout_secs),
        },
    );

    let run = pipeline
        .run(&metadata, financials.as_ref(), question)
        .await
        .context("pipeline run failed")?;

    // Present results in pipeline order: summary, validation, report.
    println!("=== Movie Summary ===\n{}\n", run.summary);

    match run.outcome {
        VerdictOutcome::None => println!("=== Validation ===\nno question asked, skipped\n"),
        outcome => {
            let verdict_text = run.verdict_text.as_deref().unwrap_or("");
            println!("=== Validation ({outcome:?}) ===\n{verdict_text}\n");
        }
    }

    println!("=== Final Report ===\n{}\n", run.final_report);

    // Export failure is reported but never invalidates the run.
    let sink = TextFileSink::new(output_dir, title);
    match run.export(&sink).await {
        Ok(artifact) => {
            println!(
                "Report written to {}",
                output_dir.join(&artifact.suggested_filename).display()
            );
        }
        Err(e) => {
            warn!(error = %e, "report export failed; the report text above is still valid");
        }
    }

    Ok(())
}

/// Print the standard agent crew.
fn cmd_crew(model: &str) -> Result<()> {
    for profile in AgentProfile::standard_crew(model) {
        println!(
            "{:<10} {} [{}] ({:?})",
            profile.role.to_string(),
            profile.name,
            profile.model,
            profile.output_mode
        );
    }
    Ok(())
}
