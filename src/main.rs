//! pathfix: reads a start and a goal position message, plans a grid path
//! between them and writes the travel time and heading change it takes.

mod mapper;
mod pipeline;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Plan a path between two UBX position fixes and summarize the drive.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with the start and goal messages as hex lines
    input: PathBuf,

    /// File the elapsed time and heading change are written to
    output: PathBuf,

    /// Configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = settings::load_settings(args.config.as_deref())?;
    pipeline::run(&settings, &args.input, &args.output)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("pathfix v{} started", env!("CARGO_PKG_VERSION"));
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
