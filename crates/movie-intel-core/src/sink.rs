//! The report-sink seam: final text in, downloadable artifact out.

use async_trait::async_trait;

/// Sink failure. Reported to the caller; never invalidates the computed
/// run outcome.
#[derive(Debug, thiserror::Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

/// An exported report: raw bytes plus a suggested download filename.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub bytes: Vec<u8>,
    pub suggested_filename: String,
}

/// External collaborator that converts final report text into an
/// artifact.
///
/// The text may contain characters outside any restricted printable
/// subset the sink supports; implementations must degrade those safely
/// rather than fail.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn render(&self, report: &str) -> Result<ReportArtifact, RenderError>;
}
