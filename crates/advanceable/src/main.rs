mod cmd;
mod exit;
mod layout;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "advanceable", version, about = "Decode and encode byte layouts")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true, env = "ADVANCEABLE_FORMAT")]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "text",
        global = true,
        env = "ADVANCEABLE_LOG_FORMAT"
    )]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        global = true,
        env = "ADVANCEABLE_LOG_LEVEL"
    )]
    log_level: LogLevel,

    /// Minimum level for cursor events such as rejected bounds checks (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "off",
        global = true,
        env = "ADVANCEABLE_CURSOR_LOG_LEVEL"
    )]
    cursor_log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level, cli.cursor_log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
