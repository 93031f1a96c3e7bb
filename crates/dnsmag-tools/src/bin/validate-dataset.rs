//! # validate-dataset
//!
//! Validates CBOR magnitude datasets against the installed CDDL schema.

use std::process::ExitCode;

use clap::Parser;

use dnsmag_tools::dataset::run_dataset;
use dnsmag_tools::{init_tracing, ValidateArgs};

/// Dataset validation tool.
///
/// Decodes each file as CBOR and validates it against schema/dataset.cddl,
/// stopping at the first file that fails.
#[derive(Parser, Debug)]
#[command(name = "validate-dataset", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.args.debug);

    let stdout = std::io::stdout();
    match run_dataset(&cli.args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
