//! Goal plan for Node projects

use super::interpretation::{
    Interpretation, BUILD_GOALS, CHECK_GOALS, CONTAINER_BUILD_GOALS, RELEASE_GOALS, TEST_GOALS,
};
use super::{
    AutofixRegisteringInterpreter, CodeInspectionRegisteringInterpreter, Enrichment, Interpreter,
};
use crate::goals::{
    compiled_typescript_cache, node_modules_cache, AutofixRegistration, Command, Goal,
    GoalDescriptions, GoalGroup, GoalKind, InspectionRegistration, MaterialChange,
    ProjectListener,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub type GoalConfigurer = Arc<dyn Fn(&mut Goal) + Send + Sync>;

/// Overrides for the goals the Node interpreter plans
#[derive(Clone, Default)]
pub struct NodeDeliveryOptions {
    pub build_goal: Option<Goal>,
    pub test_goal: Option<Goal>,
    /// Applied once to the test goal, custom or default, at construction
    pub configure_test_goal: Option<GoalConfigurer>,
}

impl NodeDeliveryOptions {
    pub fn with_build_goal(mut self, goal: Goal) -> Self {
        self.build_goal = Some(goal);
        self
    }

    pub fn with_test_goal(mut self, goal: Goal) -> Self {
        self.test_goal = Some(goal);
        self
    }

    pub fn configure_test_goal<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Goal) + Send + Sync + 'static,
    {
        self.configure_test_goal = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for NodeDeliveryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDeliveryOptions")
            .field("build_goal", &self.build_goal.as_ref().map(|g| &g.name))
            .field("test_goal", &self.test_goal.as_ref().map(|g| &g.name))
            .field("configure_test_goal", &self.configure_test_goal.is_some())
            .finish()
    }
}

pub fn default_version_goal() -> Goal {
    Goal::new("version", GoalKind::Version).with_descriptions(GoalDescriptions {
        in_process: "Calculating project version".to_string(),
        completed: "Versioned".to_string(),
        failed: "Versioning failed".to_string(),
    })
}

pub fn default_build_goal() -> Goal {
    Goal::new("npm-run-build", GoalKind::Build)
        .with_display_name("npm build")
        .with_command(Command::new("npm", &["run", "build"]))
        .isolated()
        .with_project_listener(ProjectListener::NpmInstall)
        .with_project_listener(ProjectListener::CachePut(compiled_typescript_cache()))
        .with_project_listener(ProjectListener::CachePut(node_modules_cache()))
}

pub fn default_test_goal() -> Goal {
    Goal::new("npm-run-test", GoalKind::Test)
        .with_display_name("npm test")
        .with_command(Command::new("npm", &["run", "test"]))
        .with_retry(true)
        .isolated()
        .with_descriptions(GoalDescriptions {
            in_process: "Running NPM test".to_string(),
            completed: "NPM test passed".to_string(),
            failed: "Test failures from NPM test".to_string(),
        })
        .with_project_listener(ProjectListener::CacheRestore(node_modules_cache()))
        .with_project_listener(ProjectListener::CacheRestore(compiled_typescript_cache()))
}

pub fn default_tag_goal() -> Goal {
    Goal::new("tag", GoalKind::Tag)
}

pub fn default_docker_build_goal() -> Goal {
    Goal::new("docker-build", GoalKind::DockerBuild)
        .with_display_name("docker build")
        .with_project_listener(ProjectListener::NpmVersion)
        .with_project_listener(ProjectListener::CacheRestore(node_modules_cache()))
        .with_project_listener(ProjectListener::CacheRestore(compiled_typescript_cache()))
        .with_project_listener(ProjectListener::CacheRemove(node_modules_cache()))
        .with_project_listener(ProjectListener::CacheRemove(compiled_typescript_cache()))
}

/// Plans build, test, release, checks and docker goals for projects with a
/// `node` element, and registers the linters they are set up for.
#[derive(Debug, Clone)]
pub struct NodeBuildInterpreter {
    version_goal: Goal,
    build_goal: Goal,
    test_goal: Goal,
    tag_goal: Goal,
    docker_build_goal: Goal,
}

impl Default for NodeBuildInterpreter {
    fn default() -> Self {
        Self::new(NodeDeliveryOptions::default())
    }
}

impl NodeBuildInterpreter {
    pub fn new(options: NodeDeliveryOptions) -> Self {
        let build_goal = options.build_goal.unwrap_or_else(default_build_goal);

        let mut test_goal = options.test_goal.unwrap_or_else(default_test_goal);
        if let Some(configure) = &options.configure_test_goal {
            configure(&mut test_goal);
        }

        Self {
            version_goal: default_version_goal(),
            build_goal,
            test_goal,
            tag_goal: default_tag_goal(),
            docker_build_goal: default_docker_build_goal(),
        }
    }

    pub fn build_goal(&self) -> &Goal {
        &self.build_goal
    }

    pub fn test_goal(&self) -> &Goal {
        &self.test_goal
    }
}

impl Interpreter for NodeBuildInterpreter {
    fn name(&self) -> &str {
        "NodeBuildInterpreter"
    }

    fn enrich(&self, mut interpretation: Interpretation) -> Enrichment {
        let Some(stack) = interpretation.analysis.node().cloned() else {
            debug!("No node element in analysis, skipping");
            return Enrichment::unrecognized(interpretation);
        };

        let has_build = stack.package_json.has_script("build");
        let has_test = stack.package_json.has_script("test");

        if has_build && interpretation.build_goals.is_none() {
            interpretation.build_goals = Some(
                GoalGroup::new(BUILD_GOALS)
                    .plan(self.version_goal.clone())
                    .plan(self.build_goal.clone())
                    .after(&self.version_goal),
            );
        }

        if has_test {
            interpretation.test_goals =
                Some(GoalGroup::new(TEST_GOALS).plan(self.test_goal.clone()));
            if !has_build {
                interpretation.build_goals =
                    Some(GoalGroup::new(BUILD_GOALS).plan(self.version_goal.clone()));
            }
        }

        if has_build || has_test {
            interpretation.release_goals =
                Some(GoalGroup::new(RELEASE_GOALS).plan(self.tag_goal.clone()));
        }

        let mut checks = GoalGroup::new(CHECK_GOALS);
        if let Some(existing) = interpretation.check_goals.take() {
            checks = checks.plan(existing);
        }
        interpretation.check_goals = Some(checks);

        if stack.has_docker_file() {
            interpretation.container_build_goals =
                Some(GoalGroup::new(CONTAINER_BUILD_GOALS).plan(self.docker_build_goal.clone()));
        }

        if let Some(js) = &stack.java_script {
            if js.eslint.is_enabled() {
                interpretation.add_autofix(AutofixRegistration::eslint());
                interpretation.add_inspection(InspectionRegistration::eslint());
                interpretation.add_inspection(InspectionRegistration::npm_audit());
            }
        }

        if let Some(ts) = &stack.type_script {
            if ts.tslint.is_enabled() {
                interpretation.add_autofix(AutofixRegistration::tslint());
                interpretation.add_inspection(InspectionRegistration::tslint());
                interpretation.add_inspection(InspectionRegistration::npm_audit());
            }
        }

        interpretation
            .material_change_push_tests
            .push(MaterialChange::node_defaults());

        info!(
            project = stack.project_name.as_deref().unwrap_or("<unnamed>"),
            has_build,
            has_test,
            docker = stack.has_docker_file(),
            autofixes = interpretation.autofixes.len(),
            inspections = interpretation.inspections.len(),
            "Planned Node goals"
        );

        Enrichment::recognized(interpretation)
    }

    fn as_autofix_registering(&self) -> Option<&dyn AutofixRegisteringInterpreter> {
        Some(self)
    }

    fn as_code_inspection_registering(&self) -> Option<&dyn CodeInspectionRegisteringInterpreter> {
        Some(self)
    }
}

fn restore_node_caches(goal: &mut Goal) {
    goal.add_project_listener(ProjectListener::CacheRestore(node_modules_cache()));
    goal.add_project_listener(ProjectListener::CacheRestore(compiled_typescript_cache()));
}

impl AutofixRegisteringInterpreter for NodeBuildInterpreter {
    fn autofixes(&self) -> Vec<AutofixRegistration> {
        vec![AutofixRegistration::eslint(), AutofixRegistration::tslint()]
    }

    fn configure_autofix_goal(&self, goal: &mut Goal) {
        restore_node_caches(goal);
    }
}

impl CodeInspectionRegisteringInterpreter for NodeBuildInterpreter {
    fn code_inspections(&self) -> Vec<InspectionRegistration> {
        vec![
            InspectionRegistration::eslint(),
            InspectionRegistration::tslint(),
            InspectionRegistration::npm_audit(),
        ]
    }

    fn configure_code_inspection_goal(&self, goal: &mut Goal) {
        restore_node_caches(goal);
    }
}
