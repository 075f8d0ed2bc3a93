//! Fixed fan-out of export tasks joined by a barrier.

use std::future::Future;

use loco_sync_log::spans::task_span;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::error::{ExportError, Result};
use crate::formats::WriteSummary;

/// A set of independent export tasks.
///
/// Every task runs to completion even when a sibling fails; the outcome is
/// decided only after all of them have finished.
pub struct FanOut {
    tasks: JoinSet<(&'static str, Result<WriteSummary>)>,
    expected: usize,
}

impl FanOut {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
            expected: 0,
        }
    }

    /// Spawn a named task.
    pub fn spawn<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = Result<WriteSummary>> + Send + 'static,
    {
        self.expected += 1;
        self.tasks
            .spawn(async move { (name, task.await) }.instrument(task_span(name)));
    }

    /// Wait for every task and merge their summaries.
    ///
    /// Returns [`ExportError::Incomplete`] unless all tasks succeeded.
    pub async fn join(mut self) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();
        let mut succeeded = 0;

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((name, Ok(written))) => {
                    tracing::info!(task = name, files = written.written.len(), "task done");
                    summary.merge(written);
                    succeeded += 1;
                }
                Ok((name, Err(e))) => {
                    tracing::error!(task = name, error = %e, "task failed");
                }
                Err(e) => {
                    tracing::error!(error = %e, "task panicked or was cancelled");
                }
            }
        }

        if succeeded == self.expected {
            Ok(summary)
        } else {
            Err(ExportError::Incomplete {
                expected: self.expected,
                succeeded,
            })
        }
    }
}

impl Default for FanOut {
    fn default() -> Self {
        Self::new()
    }
}
