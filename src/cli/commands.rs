use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Node.js stack detection and delivery goal planning
#[derive(Parser, Debug)]
#[command(
    name = "nodepack",
    about = "Node.js stack detection and delivery goal planning",
    version,
    author,
    long_about = "nodepack scans a repository for package.json, linter configuration, \
                  Dockerfiles and environment variable references, and derives the \
                  build, test, release, checks and docker goals a delivery pipeline \
                  should run for it."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the Node stack of a repository",
        long_about = "Reads package.json and marker files and prints the detected Node stack.\n\
                      Exits with status 2 when the repository is not a Node project.\n\n\
                      Examples:\n  \
                      nodepack scan\n  \
                      nodepack scan /path/to/repo --format json"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Derive the delivery goal plan for a repository",
        long_about = "Scans the repository and prints the goal groups, their execution \
                      order, and the autofixes and inspections to register.\n\n\
                      Examples:\n  \
                      nodepack plan\n  \
                      nodepack plan /path/to/repo --format yaml"
    )]
    Plan(ScanArgs),

    #[command(
        about = "Add or replace a script in package.json",
        long_about = "Sets scripts.<NAME> in package.json and prints the pull request \
                      that would propose the change.\n\n\
                      Examples:\n  \
                      nodepack add-script --script lint --content \"eslint .\"\n  \
                      nodepack add-script /path/to/repo --script test --dry-run"
    )]
    AddScript(AddScriptArgs),

    #[command(
        about = "Show the effective configuration",
        long_about = "Prints the configuration loaded from NODEPACK_* environment variables.\n\n\
                      Examples:\n  \
                      nodepack config\n  \
                      nodepack config --format json"
    )]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct AddScriptArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(long, value_name = "NAME", help = "Script name")]
    pub script: String,

    #[arg(
        long,
        value_name = "CMD",
        help = "Script command (a placeholder is inserted when omitted)"
    )]
    pub content: Option<String>,

    #[arg(long, help = "Print the rewritten package.json instead of writing it")]
    pub dry_run: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
