pub mod orchestrator;

pub use orchestrator::{AnalysisOrchestrator, AUTOFIX_GOAL, CODE_INSPECTION_GOAL};
