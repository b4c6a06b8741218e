use crate::goals::{Goal, GoalKind};
use crate::interpret::Interpretation;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::project::Project;
use crate::stack::ProjectAnalysis;
use crate::support::StackSupport;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub const AUTOFIX_GOAL: &str = "autofix";
pub const CODE_INSPECTION_GOAL: &str = "code-inspection";

/// Runs a stack's scanners over a project, then folds its interpreters
/// over the resulting analysis.
pub struct AnalysisOrchestrator {
    support: StackSupport,
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl AnalysisOrchestrator {
    pub fn new(support: StackSupport, progress_handler: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self {
            support,
            progress_handler,
        }
    }

    pub fn support(&self) -> &StackSupport {
        &self.support
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }

    pub async fn analyze(&self, project: &Project) -> ProjectAnalysis {
        info!("Starting analysis for: {}", project.root().display());
        self.emit(ProgressEvent::Started {
            project: project.root().display().to_string(),
        });

        let mut analysis = ProjectAnalysis::new();

        for scanner in &self.support.scanners {
            if let Some(classification) = scanner.classify(project).await {
                self.emit(ProgressEvent::Classified {
                    scanner: scanner.name().to_string(),
                    messages: classification.messages.clone(),
                });
                analysis.classifications.push(classification);
            }

            self.emit(ProgressEvent::ScanStarted {
                scanner: scanner.name().to_string(),
            });
            let scan_start = Instant::now();
            let element = scanner.scan(project).await;

            self.emit(ProgressEvent::ScanComplete {
                scanner: scanner.name().to_string(),
                detected: element.is_some(),
                duration: scan_start.elapsed(),
            });

            if let Some(element) = element {
                debug!(scanner = scanner.name(), element = element.name(), "Element detected");
                analysis.add_element(element);
            }
        }

        analysis
    }

    /// Fold every interpreter over the analysis, in registration order
    pub fn interpret(&self, analysis: ProjectAnalysis) -> Interpretation {
        let start = Instant::now();
        let elements = analysis.elements.len();
        let mut interpretation = Interpretation::new(analysis);
        let mut recognized_by = Vec::new();

        for interpreter in &self.support.interpreters {
            let enrichment = interpreter.enrich(interpretation);
            interpretation = enrichment.interpretation;

            self.emit(ProgressEvent::InterpreterComplete {
                interpreter: interpreter.name().to_string(),
                recognized: enrichment.recognized,
            });
            if enrichment.recognized {
                recognized_by.push(interpreter.name().to_string());
            }
        }

        info!(
            "Interpretation complete: recognized by {} interpreter(s)",
            recognized_by.len()
        );
        self.emit(ProgressEvent::Completed {
            elements,
            recognized_by,
            total_time: start.elapsed(),
        });

        interpretation
    }

    pub async fn run(&self, project: &Project) -> Interpretation {
        let analysis = self.analyze(project).await;
        self.interpret(analysis)
    }

    /// The host's autofix goal, prepared by every interpreter that registers autofixes
    pub fn autofix_goal(&self) -> Goal {
        let mut goal = Goal::new(AUTOFIX_GOAL, GoalKind::Autofix);
        for interpreter in &self.support.interpreters {
            if let Some(registering) = interpreter.as_autofix_registering() {
                registering.configure_autofix_goal(&mut goal);
            }
        }
        goal
    }

    /// The host's code inspection goal, prepared by every interpreter that registers inspections
    pub fn code_inspection_goal(&self) -> Goal {
        let mut goal = Goal::new(CODE_INSPECTION_GOAL, GoalKind::CodeInspection);
        for interpreter in &self.support.interpreters {
            if let Some(registering) = interpreter.as_code_inspection_registering() {
                registering.configure_code_inspection_goal(&mut goal);
            }
        }
        goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::interpret::NodeDeliveryOptions;
    use crate::support::node_stack_support;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<String>>,
    }

    impl ProgressHandler for RecordingHandler {
        fn on_progress(&self, event: &ProgressEvent) {
            let label = match event {
                ProgressEvent::Started { .. } => "started",
                ProgressEvent::Classified { .. } => "classified",
                ProgressEvent::ScanStarted { .. } => "scan-started",
                ProgressEvent::ScanComplete { .. } => "scan-complete",
                ProgressEvent::InterpreterComplete { .. } => "interpreter-complete",
                ProgressEvent::Completed { .. } => "completed",
            };
            self.events.lock().unwrap().push(label.to_string());
        }
    }

    fn project(files: &[(&str, &str)]) -> Project {
        let fs = Arc::new(MockFileSystem::new());
        for (path, content) in files {
            fs.add_file(path, content);
        }
        Project::new("/mock", fs)
    }

    fn orchestrator(handler: Option<Arc<dyn ProgressHandler>>) -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(node_stack_support(NodeDeliveryOptions::default()), handler)
    }

    #[tokio::test]
    async fn test_run_node_project() {
        let project = project(&[(
            "package.json",
            r#"{"name": "demo", "scripts": {"build": "tsc", "test": "jest"}}"#,
        )]);

        let interpretation = orchestrator(None).run(&project).await;

        assert!(interpretation.analysis.node().is_some());
        assert!(interpretation.build_goals.is_some());
        assert!(interpretation.test_goals.is_some());
        assert!(interpretation.release_goals.is_some());
    }

    #[tokio::test]
    async fn test_run_non_node_project() {
        let project = project(&[("Cargo.toml", "[package]")]);
        let interpretation = orchestrator(None).run(&project).await;

        assert!(interpretation.analysis.elements.is_empty());
        assert!(interpretation.check_goals.is_none());
        assert!(interpretation.material_change_push_tests.is_empty());
    }

    #[tokio::test]
    async fn test_classification_collected() {
        let project = project(&[("package.json", r#"{"scripts": {}}"#)]);
        let analysis = orchestrator(None).analyze(&project).await;

        assert_eq!(analysis.classifications.len(), 1);
        assert_eq!(analysis.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_progress_events_in_order() {
        let handler = Arc::new(RecordingHandler::default());
        let project = project(&[("package.json", r#"{"scripts": {"build": "tsc"}}"#)]);

        orchestrator(Some(handler.clone())).run(&project).await;

        let events = handler.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "started",
                "classified",
                "scan-started",
                "scan-complete",
                "interpreter-complete",
                "completed"
            ]
        );
    }

    #[test]
    fn test_host_goals_configured_by_hooks() {
        let orchestrator = orchestrator(None);

        assert_eq!(orchestrator.autofix_goal().listeners.len(), 2);
        assert_eq!(orchestrator.code_inspection_goal().listeners.len(), 2);
    }
}
