//! In-memory fakes for the agent and sink seams (testing only)
//!
//! Provides `ScriptedAgent`, `FailingAgent`, `MemorySink`, and
//! `FailingSink` that satisfy the trait contracts without any network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::agent::{AgentError, AgentResult, GenerativeAgent};
use crate::sink::{RenderError, ReportArtifact, ReportSink};

// ---------------------------------------------------------------------------
// ScriptedAgent
// ---------------------------------------------------------------------------

/// Agent that returns a fixed reply and counts invocations.
#[derive(Debug)]
pub struct ScriptedAgent {
    reply: String,
    calls: AtomicUsize,
}

impl ScriptedAgent {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `run` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeAgent for ScriptedAgent {
    async fn run(&self, _prompt: &str) -> AgentResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

// ---------------------------------------------------------------------------
// FailingAgent
// ---------------------------------------------------------------------------

/// Agent whose backend is always unavailable.
#[derive(Debug)]
pub struct FailingAgent {
    cause: String,
}

impl FailingAgent {
    pub fn new(cause: &str) -> Self {
        Self {
            cause: cause.to_string(),
        }
    }
}

#[async_trait]
impl GenerativeAgent for FailingAgent {
    async fn run(&self, _prompt: &str) -> AgentResult<String> {
        Err(AgentError::Unavailable(self.cause.clone()))
    }
}

// ---------------------------------------------------------------------------
// MemorySink
// ---------------------------------------------------------------------------

/// Sink that keeps the last rendered report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    rendered: Mutex<Option<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last report handed to `render`, if any.
    pub fn rendered(&self) -> Option<String> {
        self.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn render(&self, report: &str) -> Result<ReportArtifact, RenderError> {
        *self.rendered.lock().unwrap() = Some(report.to_string());
        Ok(ReportArtifact {
            bytes: report.as_bytes().to_vec(),
            suggested_filename: "report.txt".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// FailingSink
// ---------------------------------------------------------------------------

/// Sink that always fails to render.
#[derive(Debug, Default)]
pub struct FailingSink;

#[async_trait]
impl ReportSink for FailingSink {
    async fn render(&self, _report: &str) -> Result<ReportArtifact, RenderError> {
        Err(RenderError("disk full".to_string()))
    }
}
