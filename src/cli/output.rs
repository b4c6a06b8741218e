//! Output formatting for scan results, goal plans and transforms
//!
//! Every result can be rendered as JSON, YAML or human-readable text.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::NodepackConfig;
use crate::goals::{Goal, GoalGroup};
use crate::interpret::Interpretation;
use crate::stack::NodeStack;
use crate::transform::PullRequest;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalReport {
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub retry: bool,
    pub isolate: bool,
    pub after: Vec<String>,
    pub listeners: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub goals: Vec<GoalReport>,
    pub execution_order: Vec<String>,
}

/// Flattened view of an interpretation for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub project: String,
    pub recognized: bool,
    pub goal_groups: Vec<GroupReport>,
    pub execution_order: Vec<String>,
    pub has_cycle: bool,
    pub autofixes: Vec<String>,
    pub inspections: Vec<String>,
    pub material_change: Vec<MaterialChangeReport>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialChangeReport {
    pub files: Vec<String>,
    pub directories: Vec<String>,
    pub extensions: Vec<String>,
}

fn goal_report(goal: &Goal, group: &GoalGroup) -> GoalReport {
    let after = group
        .to_graph()
        .node(&goal.name)
        .map(|n| n.predecessors.clone())
        .unwrap_or_default();

    GoalReport {
        name: goal.name.clone(),
        display_name: goal.display_name.clone(),
        command: goal.command.as_ref().map(|c| c.to_string()),
        retry: goal.retry,
        isolate: goal.isolate,
        after,
        listeners: goal.listeners.iter().map(|l| l.label()).collect(),
    }
}

impl PlanReport {
    pub fn from_interpretation(project: &str, interpretation: &Interpretation) -> Self {
        let goal_groups = interpretation
            .goal_groups()
            .into_iter()
            .map(|group| GroupReport {
                name: group.name().to_string(),
                goals: group
                    .goals()
                    .into_iter()
                    .map(|g| goal_report(g, group))
                    .collect(),
                execution_order: group.to_graph().execution_order().order,
            })
            .collect();

        let overall = interpretation.goal_graph().execution_order();

        Self {
            project: project.to_string(),
            recognized: interpretation.analysis.node().is_some(),
            goal_groups,
            execution_order: overall.order,
            has_cycle: overall.has_cycle,
            autofixes: interpretation
                .autofixes
                .iter()
                .map(|a| a.name.clone())
                .collect(),
            inspections: interpretation
                .inspections
                .iter()
                .map(|i| i.name.clone())
                .collect(),
            material_change: interpretation
                .material_change_push_tests
                .iter()
                .map(|m| MaterialChangeReport {
                    files: m.files.clone(),
                    directories: m.directories.clone(),
                    extensions: m.extensions.clone(),
                })
                .collect(),
            messages: interpretation
                .analysis
                .messages()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Machine-readable rendering; human callers format by hand and never get here
    fn serialize<T: Serialize>(&self, value: &T, what: &str) -> Result<String> {
        match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)
                .with_context(|| format!("Failed to serialize {} to YAML", what)),
            OutputFormat::Json | OutputFormat::Human => serde_json::to_string_pretty(value)
                .with_context(|| format!("Failed to serialize {} to JSON", what)),
        }
    }

    pub fn format_stack(&self, stack: &NodeStack) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(self.format_stack_human(stack)),
            _ => self.serialize(stack, "node stack"),
        }
    }

    pub fn format_plan(&self, report: &PlanReport) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(self.format_plan_human(report)),
            _ => self.serialize(report, "goal plan"),
        }
    }

    pub fn format_pull_request(&self, pr: &PullRequest, manifest: Option<&str>) -> Result<String> {
        match self.format {
            OutputFormat::Human => {
                let mut output = String::new();
                output.push_str(&format!("Branch: {}\n", pr.branch));
                output.push_str(&format!("Title:  {}\n", pr.title));
                output.push_str(&format!("\n{}\n", pr.body));
                if let Some(manifest) = manifest {
                    output.push_str("\n--- package.json ---\n");
                    output.push_str(manifest);
                    output.push('\n');
                }
                Ok(output)
            }
            _ => {
                let output = serde_json::json!({
                    "pull_request": pr,
                    "package_json": manifest,
                });
                self.serialize(&output, "pull request")
            }
        }
    }

    pub fn format_config(&self, config: &NodepackConfig) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(config.to_string()),
            _ => self.serialize(&config.to_display_map(), "config"),
        }
    }

    fn format_stack_human(&self, stack: &NodeStack) -> String {
        let mut output = String::new();

        output.push_str("\u{2713} Node Stack\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        let pj = &stack.package_json;
        output.push_str(&format!(
            "Project:      {}\n",
            stack.project_name.as_deref().unwrap_or("(unnamed)")
        ));
        if let Some(version) = &pj.version {
            output.push_str(&format!("Version:      {}\n", version));
        }
        if let Some(license) = &pj.license {
            output.push_str(&format!("License:      {}\n", license));
        }
        output.push('\n');

        output.push_str("Scripts:\n");
        if pj.scripts.is_empty() {
            output.push_str("\u{2514}\u{2500} (none)\n");
        }
        for (i, (name, command)) in pj.scripts.iter().enumerate() {
            let connector = tree_connector(i, pj.scripts.len());
            output.push_str(&format!("{}\u{2500} {}: {}\n", connector, name, command));
        }
        output.push('\n');

        output.push_str("Tooling:\n");
        if let Some(ts) = &stack.type_script {
            output.push_str(&format!(
                "\u{251C}\u{2500} TypeScript: {}\n",
                match (&ts.has_dependency, &ts.version) {
                    (true, Some(v)) => v.clone(),
                    (true, None) => "yes".to_string(),
                    _ => "no".to_string(),
                }
            ));
            output.push_str(&format!(
                "\u{251C}\u{2500} TSLint:     dependency={} config={}\n",
                ts.tslint.has_dependency, ts.tslint.has_config
            ));
        }
        if let Some(js) = &stack.java_script {
            output.push_str(&format!(
                "\u{251C}\u{2500} ESLint:     dependency={} config={}\n",
                js.eslint.has_dependency, js.eslint.has_config
            ));
        }
        output.push_str(&format!(
            "\u{2514}\u{2500} Dockerfile: {}\n\n",
            stack.docker_file().unwrap_or("(none)")
        ));

        if !stack.dependencies.is_empty() {
            output.push_str(&format!("Dependencies ({}):\n", stack.dependencies.len()));
            for (i, dep) in stack.dependencies.iter().enumerate() {
                let connector = tree_connector(i, stack.dependencies.len());
                output.push_str(&format!(
                    "{}\u{2500} {} {}\n",
                    connector, dep.artifact, dep.version
                ));
            }
            output.push('\n');
        }

        if !stack.services.is_empty() {
            let services: Vec<&str> = stack.services.keys().map(String::as_str).collect();
            output.push_str(&format!("Services: {}\n", services.join(", ")));
        }

        if !stack.referenced_environment_variables.is_empty() {
            output.push_str(&format!(
                "Environment: {}\n",
                stack.referenced_environment_variables.join(", ")
            ));
        }

        output
    }

    fn format_plan_human(&self, report: &PlanReport) -> String {
        let mut output = String::new();

        if report.recognized {
            output.push_str(&format!("\u{2713} Goal Plan: {}\n", report.project));
        } else {
            output.push_str(&format!(
                "\u{26A0} Goal Plan: {} (not a Node project)\n",
                report.project
            ));
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        for group in &report.goal_groups {
            output.push_str(&format!("{}:\n", group.name));
            if group.goals.is_empty() {
                output.push_str("\u{2514}\u{2500} (empty)\n\n");
                continue;
            }
            for (i, goal) in group.goals.iter().enumerate() {
                let connector = tree_connector(i, group.goals.len());
                output.push_str(&format!("{}\u{2500} {}", connector, goal.display_name));
                if let Some(command) = &goal.command {
                    output.push_str(&format!("  [{}]", command));
                }
                if !goal.after.is_empty() {
                    output.push_str(&format!("  after {}", goal.after.join(", ")));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        if !report.execution_order.is_empty() {
            output.push_str(&format!(
                "Execution order: {}\n",
                report.execution_order.join(" \u{2192} ")
            ));
            if report.has_cycle {
                output.push_str("\u{26A0} Goal ordering contains a cycle\n");
            }
            output.push('\n');
        }

        if !report.autofixes.is_empty() {
            output.push_str(&format!("Autofixes:   {}\n", report.autofixes.join(", ")));
        }
        if !report.inspections.is_empty() {
            output.push_str(&format!("Inspections: {}\n", report.inspections.join(", ")));
        }
        for rule in &report.material_change {
            output.push_str(&format!(
                "Material change: files [{}], directories [{}], extensions [{}]\n",
                rule.files.join(", "),
                rule.directories.join(", "),
                rule.extensions.join(", ")
            ));
        }

        if !report.messages.is_empty() {
            output.push_str("\n\u{26A0} Suggestions:\n");
            for message in &report.messages {
                output.push_str(&format!("  - {}\n", message));
            }
        }

        output
    }
}

fn tree_connector(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        "\u{2514}"
    } else {
        "\u{251C}"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::{Interpreter, NodeBuildInterpreter};
    use crate::stack::{PackageJsonSummary, ProjectAnalysis, TechnologyElement};
    use indexmap::IndexMap;

    fn stack() -> NodeStack {
        let mut scripts = IndexMap::new();
        scripts.insert("build".to_string(), "tsc".to_string());
        NodeStack::new(PackageJsonSummary {
            name: Some("demo".to_string()),
            version: Some("1.0.0".to_string()),
            scripts,
            ..Default::default()
        })
        .with_docker_file("Dockerfile")
    }

    fn report() -> PlanReport {
        let analysis = ProjectAnalysis::new().with_element(TechnologyElement::Node(stack()));
        let interpretation = NodeBuildInterpreter::default()
            .enrich(Interpretation::new(analysis))
            .interpretation;
        PlanReport::from_interpretation("demo", &interpretation)
    }

    #[test]
    fn test_plan_report() {
        let report = report();

        assert!(report.recognized);
        let names: Vec<&str> = report.goal_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["build", "release", "checks", "docker build"]);
        assert_eq!(report.goal_groups[0].execution_order, vec!["version", "npm-run-build"]);
        assert_eq!(report.goal_groups[0].goals[1].after, vec!["version"]);
        assert_eq!(
            report.goal_groups[0].goals[1].command.as_deref(),
            Some("npm run build")
        );
        assert!(!report.has_cycle);
    }

    #[test]
    fn test_format_plan_json() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_plan(&report())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["project"], "demo");
        assert_eq!(value["goal_groups"][0]["name"], "build");
    }

    #[test]
    fn test_format_plan_human() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_plan(&report())
            .unwrap();

        assert!(output.contains("Goal Plan: demo"));
        assert!(output.contains("npm build  [npm run build]  after version"));
        assert!(output.contains("Material change: files [Dockerfile]"));
    }

    #[test]
    fn test_format_stack_yaml() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format_stack(&stack())
            .unwrap();
        assert!(output.contains("name: node"));
        assert!(output.contains("docker_file: Dockerfile"));
    }

    #[test]
    fn test_format_stack_human() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_stack(&stack())
            .unwrap();

        assert!(output.contains("Project:      demo"));
        assert!(output.contains("build: tsc"));
        assert!(output.contains("Dockerfile: Dockerfile"));
    }

    #[test]
    fn test_format_pull_request() {
        let pr = PullRequest {
            branch: "package-lint-script-20240101000000".to_string(),
            title: "Add lint script to package.json".to_string(),
            body: "body".to_string(),
        };

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_pull_request(&pr, Some("{}"))
            .unwrap();
        assert!(human.contains("Branch: package-lint-script-20240101000000"));
        assert!(human.contains("--- package.json ---"));

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_pull_request(&pr, None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pull_request"]["title"], "Add lint script to package.json");
        assert!(value["package_json"].is_null());
    }
}
