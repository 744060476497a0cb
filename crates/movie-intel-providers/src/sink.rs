//! Plain-text report sink.
//!
//! Degrades characters outside Latin-1 instead of failing, mirroring
//! the restricted printable subset of the downstream document format.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use movie_intel_core::{RenderError, ReportArtifact, ReportSink};

/// Drop characters the restricted output charset cannot carry.
fn degrade_to_latin1(text: &str) -> String {
    text.chars().filter(|c| (*c as u32) <= 0xFF).collect()
}

/// Build the suggested download filename for a title.
fn report_filename(title: &str) -> String {
    format!("{}_Movie_Report.txt", title.replace(' ', "_"))
}

/// Sink that writes the report as a text file under an output directory.
pub struct TextFileSink {
    output_dir: PathBuf,
    title: String,
}

impl TextFileSink {
    pub fn new(output_dir: impl Into<PathBuf>, title: &str) -> Self {
        Self {
            output_dir: output_dir.into(),
            title: title.to_string(),
        }
    }
}

#[async_trait]
impl ReportSink for TextFileSink {
    async fn render(&self, report: &str) -> Result<ReportArtifact, RenderError> {
        let safe_text = degrade_to_latin1(report);
        let suggested_filename = report_filename(&self.title);
        let path = self.output_dir.join(&suggested_filename);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| RenderError(format!("creating {}: {e}", self.output_dir.display())))?;
        tokio::fs::write(&path, safe_text.as_bytes())
            .await
            .map_err(|e| RenderError(format!("writing {}: {e}", path.display())))?;

        info!(path = %path.display(), "report written");
        Ok(ReportArtifact {
            bytes: safe_text.into_bytes(),
            suggested_filename,
        })
    }
}
