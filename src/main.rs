use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use minidb::Table;
use minidb::repl;

/// Interactive shell over a single fixed-capacity table.
#[derive(Parser, Debug)]
#[command(name = "minidb", version, about = "Interactive shell over a single fixed-capacity table")]
struct Args {
    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut table = Table::new();
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    let outcome = repl::run(&mut table, stdin, &mut stdout)?;
    debug!(?outcome, rows = table.row_count(), "session ended");
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("minidb=debug")
    } else {
        EnvFilter::new("minidb=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
