use codepeek::cli::commands::{CliArgs, Commands};
use codepeek::cli::handlers::{handle_analyze, handle_parse, handle_preview, handle_render};
use codepeek::util::logging::{init_logging, parse_level, LoggingConfig};
use codepeek::{CodepeekConfig, VERSION};

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("codepeek v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Parse(input_args) => handle_parse(input_args),
        Commands::Analyze(input_args) => handle_analyze(input_args),
        Commands::Preview(preview_args) => handle_preview(preview_args),
        Commands::Render(render_args) => handle_render(render_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        CodepeekConfig::default().log_level
    };

    let use_json = env::var("CODEPEEK_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..LoggingConfig::default()
    });
}
