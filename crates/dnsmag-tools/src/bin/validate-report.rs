//! # validate-report
//!
//! Validates JSON magnitude reports against the installed JSON Schema.

use std::process::ExitCode;

use clap::Parser;

use dnsmag_tools::report::run_report;
use dnsmag_tools::{init_tracing, ValidateArgs};

/// Report validation tool.
///
/// Parses each file as JSON and validates it against
/// schema/report-schema.json (Draft 2020-12, formats asserted), stopping at
/// the first file that fails.
#[derive(Parser, Debug)]
#[command(name = "validate-report", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.args.debug);

    let stdout = std::io::stdout();
    match run_report(&cli.args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
