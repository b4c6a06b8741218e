pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AddScriptArgs, CliArgs, Commands, ConfigArgs, ScanArgs};
pub use output::{OutputFormat, OutputFormatter, PlanReport};
