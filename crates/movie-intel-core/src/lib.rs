//! Movie Intelligence Core
//!
//! Domain model and orchestration for a four-agent report pipeline:
//! - Decodes provider payloads into a fixed-shape [`MovieRecord`]
//! - Drives Analyzer → (Answerer → Validator) → Composer sequentially
//! - Gates question answers behind a fail-closed validation verdict
//! - Hands the final report to a pluggable [`ReportSink`]

pub mod agent;
pub mod context;
pub mod error;
pub mod fakes;
pub mod pipeline;
pub mod profile;
pub mod record;
pub mod report;
pub mod sink;
pub mod telemetry;
pub mod verdict;

// Re-export key types
pub use agent::{AgentError, AgentResult, GenerativeAgent};
pub use context::ContextBuilder;
pub use error::{MovieIntelError, Result};
pub use pipeline::{MoviePipeline, PipelineConfig, PipelineRun, RunState, StageOutcome};
pub use profile::{AgentProfile, AgentRole, OutputMode};
pub use record::{Money, MovieRecord, UNKNOWN};
pub use report::{assemble_body, QaSection};
pub use sink::{RenderError, ReportArtifact, ReportSink};
pub use telemetry::init_tracing;
pub use verdict::{parse_verdict, VerdictOutcome};
