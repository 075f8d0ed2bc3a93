//! Span and timing helpers.

use tracing::{info_span, Span};

/// Span wrapping one command invocation.
pub fn command_span(command: &str) -> Span {
    info_span!("command", name = %command)
}

/// Span for one concurrent export sub-task.
pub fn task_span(task: &'static str) -> Span {
    info_span!("task", name = task)
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
    }
}
