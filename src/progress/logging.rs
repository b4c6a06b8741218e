//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { project } => {
                info!(project = %project, "Starting analysis");
            }
            ProgressEvent::Classified { scanner, messages } => {
                for message in messages {
                    info!(scanner = %scanner, "{}", message);
                }
            }
            ProgressEvent::ScanStarted { scanner } => {
                debug!(scanner = %scanner, "Running scanner");
            }
            ProgressEvent::ScanComplete {
                scanner,
                detected,
                duration,
            } => {
                debug!(
                    scanner = %scanner,
                    detected,
                    duration_ms = duration.as_millis(),
                    "Scanner complete"
                );
            }
            ProgressEvent::InterpreterComplete {
                interpreter,
                recognized,
            } => {
                debug!(interpreter = %interpreter, recognized, "Interpreter complete");
            }
            ProgressEvent::Completed {
                elements,
                recognized_by,
                total_time,
            } => {
                info!(
                    elements,
                    recognized_by = ?recognized_by,
                    total_time_ms = total_time.as_millis(),
                    "Analysis complete"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::Started {
                project: "/test".to_string(),
            },
            ProgressEvent::Classified {
                scanner: "node".to_string(),
                messages: vec!["Add a build script".to_string()],
            },
            ProgressEvent::ScanStarted {
                scanner: "node".to_string(),
            },
            ProgressEvent::ScanComplete {
                scanner: "node".to_string(),
                detected: false,
                duration: Duration::from_millis(3),
            },
            ProgressEvent::InterpreterComplete {
                interpreter: "NodeBuildInterpreter".to_string(),
                recognized: true,
            },
            ProgressEvent::Completed {
                elements: 1,
                recognized_by: vec![],
                total_time: Duration::from_millis(10),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
