use crate::goals::{
    AutofixRegistration, GoalGraph, GoalGroup, InspectionRegistration, MaterialChange,
};
use crate::stack::ProjectAnalysis;
use serde::{Deserialize, Serialize};

pub const BUILD_GOALS: &str = "build";
pub const TEST_GOALS: &str = "test";
pub const RELEASE_GOALS: &str = "release";
pub const CHECK_GOALS: &str = "checks";
pub const CONTAINER_BUILD_GOALS: &str = "docker build";

/// Goal plan derived from a project analysis.
///
/// Each interpreter receives the interpretation produced by the previous one
/// and returns a new one; see [`Interpreter`](super::Interpreter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub analysis: ProjectAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_goals: Option<GoalGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_goals: Option<GoalGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_goals: Option<GoalGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_goals: Option<GoalGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_build_goals: Option<GoalGroup>,
    pub autofixes: Vec<AutofixRegistration>,
    pub inspections: Vec<InspectionRegistration>,
    pub material_change_push_tests: Vec<MaterialChange>,
}

impl Interpretation {
    pub fn new(analysis: ProjectAnalysis) -> Self {
        Self {
            analysis,
            ..Default::default()
        }
    }

    /// Register an autofix unless one with the same name is already present
    pub fn add_autofix(&mut self, autofix: AutofixRegistration) {
        if !self.autofixes.iter().any(|a| a.name == autofix.name) {
            self.autofixes.push(autofix);
        }
    }

    /// Register an inspection unless one with the same name is already present
    pub fn add_inspection(&mut self, inspection: InspectionRegistration) {
        if !self.inspections.iter().any(|i| i.name == inspection.name) {
            self.inspections.push(inspection);
        }
    }

    /// Populated goal groups in delivery order: build, test, release, checks, docker build
    pub fn goal_groups(&self) -> Vec<&GoalGroup> {
        [
            &self.build_goals,
            &self.test_goals,
            &self.release_goals,
            &self.check_goals,
            &self.container_build_goals,
        ]
        .into_iter()
        .filter_map(Option::as_ref)
        .collect()
    }

    /// All goals of all populated groups merged into one graph
    pub fn goal_graph(&self) -> GoalGraph {
        let mut graph = GoalGraph::new();
        for group in self.goal_groups() {
            group.add_to_graph(&mut graph, &[]);
        }
        graph
    }

    pub fn has_goals(&self) -> bool {
        self.goal_groups().iter().any(|g| !g.goals().is_empty())
    }
}
