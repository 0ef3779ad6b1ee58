//! Result sinks: where finished matches go.
//!
//! The arena does not prescribe a storage format; it hands every finished
//! match and its rating deltas to whatever sink it was constructed with.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::orchestrator::MatchReport;

/// Receives finished matches for persistence.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn record(&self, report: &MatchReport) -> anyhow::Result<()>;
}

/// In-memory sink, standing in for an external store. Keeps every finished
/// match for inspection.
pub struct MemorySink {
    finished: Mutex<Vec<MatchReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            finished: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn finished(&self) -> Vec<MatchReport> {
        self.finished
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn record(&self, report: &MatchReport) -> anyhow::Result<()> {
        self.finished
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }
}
