//! Command handlers. Each returns the process exit code.

use super::commands::{AddScriptArgs, ConfigArgs, ScanArgs};
use super::output::{OutputFormat, OutputFormatter, PlanReport};
use crate::config::NodepackConfig;
use crate::fs::RealFileSystem;
use crate::interpret::NodeDeliveryOptions;
use crate::pipeline::AnalysisOrchestrator;
use crate::progress::{LoggingHandler, ProgressHandler};
use crate::project::Project;
use crate::stack::{NodeScanner, TechnologyScanner};
use crate::support::node_stack_support_with_config;
use crate::transform::{PackageScriptTransform, ScriptParameters};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_NOT_NODE: i32 = 2;

fn load_config() -> Result<NodepackConfig> {
    let config = NodepackConfig::from_env().context("Invalid nodepack configuration")?;
    debug!("{}", config);
    Ok(config)
}

fn open_project(path: Option<&Path>, config: &NodepackConfig) -> Result<Project> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let root: PathBuf = path
        .canonicalize()
        .with_context(|| format!("Repository path {} does not exist", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Repository path {} is not a directory", root.display());
    }

    Ok(Project::new(root, Arc::new(RealFileSystem::new())).with_max_depth(config.max_depth))
}

fn report_error(e: anyhow::Error) -> i32 {
    error!("{:#}", e);
    eprintln!("Error: {:#}", e);
    EXIT_FAILURE
}

pub async fn handle_scan(args: &ScanArgs) -> i32 {
    match run_scan(args).await {
        Ok(code) => code,
        Err(e) => report_error(e),
    }
}

async fn run_scan(args: &ScanArgs) -> Result<i32> {
    let config = load_config()?;
    let project = open_project(args.repository_path.as_deref(), &config)?;
    let scanner = NodeScanner::with_config(config.scan_config());

    if let Some(classification) = scanner.classify(&project).await {
        for message in &classification.messages {
            info!("{}", message);
        }
    }

    let Some(stack) = scanner.scan_node(&project).await else {
        eprintln!("{} is not a Node project", project.root().display());
        return Ok(EXIT_NOT_NODE);
    };

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    println!("{}", formatter.format_stack(&stack)?);
    Ok(EXIT_SUCCESS)
}

pub async fn handle_plan(args: &ScanArgs, quiet: bool) -> i32 {
    match run_plan(args, quiet).await {
        Ok(code) => code,
        Err(e) => report_error(e),
    }
}

async fn run_plan(args: &ScanArgs, quiet: bool) -> Result<i32> {
    let config = load_config()?;
    let project = open_project(args.repository_path.as_deref(), &config)?;

    let support = node_stack_support_with_config(NodeDeliveryOptions::default(), config.scan_config());
    let handler: Option<Arc<dyn ProgressHandler>> = if quiet {
        None
    } else {
        Some(Arc::new(LoggingHandler))
    };
    let orchestrator = AnalysisOrchestrator::new(support, handler);

    let interpretation = orchestrator.run(&project).await;
    let report = PlanReport::from_interpretation(&project.name(), &interpretation);

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    println!("{}", formatter.format_plan(&report)?);

    if report.recognized {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_NOT_NODE)
    }
}

pub fn handle_add_script(args: &AddScriptArgs) -> i32 {
    match run_add_script(args) {
        Ok(code) => code,
        Err(e) => report_error(e),
    }
}

fn run_add_script(args: &AddScriptArgs) -> Result<i32> {
    let config = load_config()?;
    let project = open_project(args.repository_path.as_deref(), &config)?;

    let params = ScriptParameters {
        script: args.script.clone(),
        content: args.content.clone(),
    };
    let transform = PackageScriptTransform::new();

    let manifest = if args.dry_run {
        Some(
            transform
                .rewrite(&project, &params)
                .context("Failed to rewrite package.json")?,
        )
    } else {
        transform
            .transform(&project, &params)
            .context("Failed to update package.json")?;
        None
    };

    let pr = transform.presentation_now(&params);
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    println!("{}", formatter.format_pull_request(&pr, manifest.as_deref())?);
    Ok(EXIT_SUCCESS)
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let result = load_config().and_then(|config| {
        OutputFormatter::new(OutputFormat::from(args.format)).format_config(&config)
    });
    match result {
        Ok(output) => {
            println!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => report_error(e),
    }
}
