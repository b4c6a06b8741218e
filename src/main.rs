use nodepack::cli::commands::{CliArgs, Commands};
use nodepack::cli::handlers::{handle_add_script, handle_config, handle_plan, handle_scan};
use nodepack::util::logging::{init_logging, parse_level, LoggingConfig};
use nodepack::VERSION;

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("nodepack v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Scan(scan_args) => handle_scan(scan_args).await,
        Commands::Plan(plan_args) => handle_plan(plan_args, args.quiet).await,
        Commands::AddScript(add_args) => handle_add_script(add_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
