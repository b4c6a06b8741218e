//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while analyzing and interpreting a project
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started
    Started { project: String },

    /// A scanner's classification pass produced advice
    Classified {
        scanner: String,
        messages: Vec<String>,
    },

    /// A scanner started its full scan
    ScanStarted { scanner: String },

    /// A scanner finished
    ScanComplete {
        scanner: String,
        detected: bool,
        duration: Duration,
    },

    /// One interpreter step finished
    InterpreterComplete { interpreter: String, recognized: bool },

    /// Analysis and interpretation finished
    Completed {
        elements: usize,
        recognized_by: Vec<String>,
        total_time: Duration,
    },
}

/// Trait for handling progress events
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
