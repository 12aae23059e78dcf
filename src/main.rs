mod cmd;
mod io;
mod logger;

use anyhow::Result;
use clap::Parser;
use logger::{LoggerConfig, LoggerFormat};
use tracing::Level;

/// ssshare: Shamir secret sharing on the command line.
///
/// Split a secret into N shares so that any K of them reconstruct it
/// and fewer reveal nothing. Shares use the `<bits><id><data>` hex format
/// and interoperate with other implementations of that format.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: cmd::Command,

    /// Log debug events to stderr (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t)]
    log_format: LoggerFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    logger::init_logger(LoggerConfig {
        format: cli.log_format,
        level,
    });
    cmd::run(cli.command)
}
