//! Sequential agent-pipeline orchestration with a validation gate.
//!
//! One [`MoviePipeline::run`] call drives a strictly forward-progressing
//! state machine:
//!
//! `Idle → ContextReady → Summarized → (QaPending | QaSkipped) → Validated
//! → Composed → Done`, with `Failed` reachable from any step.
//!
//! Every stage blocks until its response arrives; each stage's prompt
//! depends on the previous stage's output, so there is nothing to fan
//! out. The sole failure-absorption point is composition: a composer
//! failure degrades to the pre-composition body instead of aborting.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::GenerativeAgent;
use crate::context::ContextBuilder;
use crate::error::{MovieIntelError, Result};
use crate::profile::AgentRole;
use crate::record::MovieRecord;
use crate::report::{assemble_body, QaSection};
use crate::sink::{ReportArtifact, ReportSink};
use crate::verdict::{parse_verdict, VerdictOutcome};

/// Pipeline states. No state is ever revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ContextReady,
    Summarized,
    QaPending,
    QaSkipped,
    Validated,
    Composed,
    Done,
    Failed,
}

/// Record of one completed stage, kept on the run for reporting.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    /// Stage name (`context`, `analyzer`, `answerer`, `validator`,
    /// `composer`).
    pub stage: String,

    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,

    /// Whether the stage fell back to degraded output.
    pub degraded: bool,
}

/// Ephemeral aggregate for one pipeline invocation.
///
/// Owned exclusively by the invocation that created it; discarded once
/// the report has been handed to the sink.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub state: RunState,
    pub record: MovieRecord,
    pub question: Option<String>,
    pub summary: String,
    pub answer: Option<String>,
    pub verdict_text: Option<String>,
    /// `None` iff no question was supplied.
    pub outcome: VerdictOutcome,
    pub final_report: String,
    pub stages: Vec<StageOutcome>,
}

impl PipelineRun {
    /// Hand the final report to a sink.
    ///
    /// A sink failure is surfaced as [`MovieIntelError::Render`] but
    /// never invalidates the computed run the caller already holds.
    pub async fn export(&self, sink: &dyn ReportSink) -> Result<ReportArtifact> {
        sink.render(&self.final_report)
            .await
            .map_err(|e| MovieIntelError::Render(e.to_string()))
    }
}

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bounded wait applied around every agent call. A timeout surfaces
    /// as [`MovieIntelError::AgentUnavailable`].
    pub agent_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            agent_timeout: Duration::from_secs(30),
        }
    }
}

/// The four-agent report pipeline.
///
/// Holds one agent per role; agents are immutable and shared read-only
/// across runs, so the pipeline itself is freely shareable.
pub struct MoviePipeline {
    analyzer: Arc<dyn GenerativeAgent>,
    answerer: Arc<dyn GenerativeAgent>,
    validator: Arc<dyn GenerativeAgent>,
    composer: Arc<dyn GenerativeAgent>,
    config: PipelineConfig,
}

impl MoviePipeline {
    pub fn new(
        analyzer: Arc<dyn GenerativeAgent>,
        answerer: Arc<dyn GenerativeAgent>,
        validator: Arc<dyn GenerativeAgent>,
        composer: Arc<dyn GenerativeAgent>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            analyzer,
            answerer,
            validator,
            composer,
            config,
        }
    }

    /// Execute one full run over the raw provider payloads.
    ///
    /// `question` is optional; when absent the answer/validation stages
    /// are skipped entirely and the report carries only the summary.
    pub async fn run(
        &self,
        metadata: &Value,
        financials: Option<&Value>,
        question: Option<&str>,
    ) -> Result<PipelineRun> {
        let run_id = Uuid::new_v4();
        let question = question
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        info!(run_id = %run_id, has_question = question.is_some(), "starting pipeline run");

        // Idle → ContextReady
        let start = Instant::now();
        let record = ContextBuilder::build(metadata, financials)?;
        let mut run = PipelineRun {
            run_id,
            started_at: Utc::now(),
            state: RunState::ContextReady,
            record,
            question,
            summary: String::new(),
            answer: None,
            verdict_text: None,
            outcome: VerdictOutcome::None,
            final_report: String::new(),
            stages: vec![StageOutcome {
                stage: "context".to_string(),
                duration_ms: start.elapsed().as_millis() as u64,
                degraded: false,
            }],
        };
        let context = run.record.context_block();
        debug!(run_id = %run_id, title = %run.record.title, "context ready");

        // ContextReady → Summarized
        run.summary = self
            .invoke(&mut run, AgentRole::Analyzer, &context)
            .await?;
        run.state = RunState::Summarized;

        // Summarized → QaPending | QaSkipped
        let qa = match run.question.clone() {
            Some(question) => {
                run.state = RunState::QaPending;

                let answer_prompt =
                    format!("Movie Data:\n{context}\n\nQuestion:\n{question}");
                let answer = self
                    .invoke(&mut run, AgentRole::Answerer, &answer_prompt)
                    .await?;

                let validation_prompt = format!(
                    "Movie Data:\n{context}\n\nQuestion:\n{question}\n\nAnswer:\n{answer}"
                );
                let verdict_text = self
                    .invoke(&mut run, AgentRole::Validator, &validation_prompt)
                    .await?;

                let outcome = parse_verdict(&verdict_text);
                info!(run_id = %run_id, outcome = ?outcome, "validation gate evaluated");

                run.answer = Some(answer.clone());
                run.verdict_text = Some(verdict_text.clone());
                run.outcome = outcome;
                Some(QaSection {
                    question,
                    answer,
                    verdict_text,
                    outcome,
                })
            }
            None => {
                debug!(run_id = %run_id, "no question supplied, skipping answer and validation");
                run.state = RunState::QaSkipped;
                None
            }
        };
        run.state = RunState::Validated;

        // Validated → Composed. Composition is the one recoverable
        // stage: on failure the raw assembled body is the report.
        let body = assemble_body(&run.summary, qa.as_ref());
        let start = Instant::now();
        match self
            .call_agent(&*self.composer, AgentRole::Composer, &body)
            .await
        {
            Ok(polished) => {
                run.final_report = polished;
                run.stages.push(StageOutcome {
                    stage: AgentRole::Composer.to_string(),
                    duration_ms: start.elapsed().as_millis() as u64,
                    degraded: false,
                });
            }
            Err(e) => {
                warn!(run_id = %run_id, error = %e, "composer failed, using unformatted body");
                run.final_report = body;
                run.stages.push(StageOutcome {
                    stage: AgentRole::Composer.to_string(),
                    duration_ms: start.elapsed().as_millis() as u64,
                    degraded: true,
                });
            }
        }
        run.state = RunState::Composed;

        // Composed → Done: the report is ready for hand-off.
        run.state = RunState::Done;
        info!(run_id = %run_id, stages = run.stages.len(), "pipeline run complete");
        Ok(run)
    }

    /// Run one fatal stage and record its outcome on the run.
    async fn invoke(
        &self,
        run: &mut PipelineRun,
        role: AgentRole,
        prompt: &str,
    ) -> Result<String> {
        let agent: &dyn GenerativeAgent = match role {
            AgentRole::Analyzer => &*self.analyzer,
            AgentRole::Answerer => &*self.answerer,
            AgentRole::Validator => &*self.validator,
            AgentRole::Composer => &*self.composer,
        };
        let start = Instant::now();
        let text = self.call_agent(agent, role, prompt).await?;
        run.stages.push(StageOutcome {
            stage: role.to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
            degraded: false,
        });
        Ok(text)
    }

    /// One bounded agent call. A timeout is reported the same way as an
    /// unreachable backend.
    async fn call_agent(
        &self,
        agent: &dyn GenerativeAgent,
        role: AgentRole,
        prompt: &str,
    ) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(MovieIntelError::InsufficientData(format!(
                "empty prompt for stage '{role}'"
            )));
        }
        debug!(stage = %role, prompt_len = prompt.len(), "invoking agent");

        match tokio::time::timeout(self.config.agent_timeout, agent.run(prompt)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(MovieIntelError::AgentUnavailable {
                stage: role.to_string(),
                cause: e.to_string(),
            }),
            Err(_) => Err(MovieIntelError::AgentUnavailable {
                stage: role.to_string(),
                cause: format!(
                    "timed out after {}s",
                    self.config.agent_timeout.as_secs()
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentError, AgentResult};
    use crate::fakes::ScriptedAgent;
    use async_trait::async_trait;
    use serde_json::json;

    /// Agent whose backend never responds.
    struct StalledAgent;

    #[async_trait]
    impl GenerativeAgent for StalledAgent {
        async fn run(&self, _prompt: &str) -> AgentResult<String> {
            std::future::pending().await
        }
    }

    /// Agent that always reports an unreachable backend.
    struct DownAgent;

    #[async_trait]
    impl GenerativeAgent for DownAgent {
        async fn run(&self, _prompt: &str) -> AgentResult<String> {
            Err(AgentError::Unavailable("connection refused".to_string()))
        }
    }

    fn metadata() -> Value {
        json!({
            "Title": "Inception",
            "Year": "2010",
            "Director": "Christopher Nolan",
            "Plot": "Dreams within dreams.",
        })
    }

    fn pipeline_with(
        analyzer: Arc<dyn GenerativeAgent>,
        answerer: Arc<dyn GenerativeAgent>,
        validator: Arc<dyn GenerativeAgent>,
        composer: Arc<dyn GenerativeAgent>,
    ) -> MoviePipeline {
        MoviePipeline::new(
            analyzer,
            answerer,
            validator,
            composer,
            PipelineConfig {
                agent_timeout: Duration::from_secs(5),
            },
        )
    }

    #[tokio::test]
    async fn test_run_without_question_skips_qa_agents() {
        let answerer = Arc::new(ScriptedAgent::new("should never run"));
        let validator = Arc::new(ScriptedAgent::new("should never run"));
        let pipeline = pipeline_with(
            Arc::new(ScriptedAgent::new("A dream heist thriller.")),
            answerer.clone(),
            validator.clone(),
            Arc::new(ScriptedAgent::new("# Report\nA dream heist thriller.")),
        );

        let run = pipeline.run(&metadata(), None, None).await.unwrap();

        assert_eq!(run.state, RunState::Done);
        assert_eq!(run.outcome, VerdictOutcome::None);
        assert!(run.answer.is_none());
        assert_eq!(answerer.call_count(), 0);
        assert_eq!(validator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_question_is_treated_as_no_question() {
        let answerer = Arc::new(ScriptedAgent::new("unused"));
        let pipeline = pipeline_with(
            Arc::new(ScriptedAgent::new("Summary.")),
            answerer.clone(),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("Report.")),
        );

        let run = pipeline.run(&metadata(), None, Some("   ")).await.unwrap();
        assert_eq!(run.outcome, VerdictOutcome::None);
        assert_eq!(answerer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyzer_failure_aborts_run() {
        let pipeline = pipeline_with(
            Arc::new(DownAgent),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("unused")),
        );

        let err = pipeline.run(&metadata(), None, None).await.unwrap_err();
        match err {
            MovieIntelError::AgentUnavailable { stage, cause } => {
                assert_eq!(stage, "analyzer");
                assert!(cause.contains("connection refused"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_agent_timeout_surfaces_as_unavailable() {
        let pipeline = pipeline_with(
            Arc::new(StalledAgent),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("unused")),
        );

        let err = pipeline.run(&metadata(), None, None).await.unwrap_err();
        match err {
            MovieIntelError::AgentUnavailable { stage, cause } => {
                assert_eq!(stage, "analyzer");
                assert!(cause.contains("timed out"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_composer_failure_degrades_to_assembled_body() {
        let pipeline = pipeline_with(
            Arc::new(ScriptedAgent::new("A dream heist thriller.")),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(DownAgent),
        );

        let run = pipeline.run(&metadata(), None, None).await.unwrap();
        assert_eq!(run.state, RunState::Done);
        assert!(!run.final_report.is_empty());
        assert!(run.final_report.contains("A dream heist thriller."));

        let composer_stage = run
            .stages
            .iter()
            .find(|s| s.stage == "composer")
            .unwrap();
        assert!(composer_stage.degraded);
    }

    #[tokio::test]
    async fn test_insufficient_data_aborts_before_any_agent_call() {
        let analyzer = Arc::new(ScriptedAgent::new("unused"));
        let pipeline = pipeline_with(
            analyzer.clone(),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("unused")),
            Arc::new(ScriptedAgent::new("unused")),
        );

        let err = pipeline.run(&json!({}), None, None).await.unwrap_err();
        assert!(matches!(err, MovieIntelError::InsufficientData(_)));
        assert_eq!(analyzer.call_count(), 0);
    }
}
