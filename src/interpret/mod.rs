//! Turning a project analysis into a goal plan.
//!
//! Interpreters are folded in order over an [`Interpretation`]. Each one takes
//! ownership of the current interpretation and hands back the next, together
//! with whether it recognized the project.

pub mod interpretation;
pub mod node_build;

pub use interpretation::{
    Interpretation, BUILD_GOALS, CHECK_GOALS, CONTAINER_BUILD_GOALS, RELEASE_GOALS, TEST_GOALS,
};
pub use node_build::{
    default_build_goal, default_docker_build_goal, default_tag_goal, default_test_goal,
    default_version_goal, NodeBuildInterpreter, NodeDeliveryOptions,
};

use crate::goals::{AutofixRegistration, Goal, InspectionRegistration};

/// Output of one interpreter step
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub interpretation: Interpretation,
    pub recognized: bool,
}

impl Enrichment {
    pub fn recognized(interpretation: Interpretation) -> Self {
        Self {
            interpretation,
            recognized: true,
        }
    }

    pub fn unrecognized(interpretation: Interpretation) -> Self {
        Self {
            interpretation,
            recognized: false,
        }
    }
}

pub trait Interpreter: Send + Sync {
    fn name(&self) -> &str;

    fn enrich(&self, interpretation: Interpretation) -> Enrichment;

    fn as_autofix_registering(&self) -> Option<&dyn AutofixRegisteringInterpreter> {
        None
    }

    fn as_code_inspection_registering(&self) -> Option<&dyn CodeInspectionRegisteringInterpreter> {
        None
    }
}

/// An interpreter that contributes autofixes and prepares the host's autofix goal
pub trait AutofixRegisteringInterpreter {
    fn autofixes(&self) -> Vec<AutofixRegistration>;

    fn configure_autofix_goal(&self, goal: &mut Goal);
}

/// An interpreter that contributes inspections and prepares the host's inspection goal
pub trait CodeInspectionRegisteringInterpreter {
    fn code_inspections(&self) -> Vec<InspectionRegistration>;

    fn configure_code_inspection_goal(&self, goal: &mut Goal);
}
