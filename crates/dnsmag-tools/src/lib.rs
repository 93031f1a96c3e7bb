//! # dnsmag-tools: Schema Validators for DNS Magnitude Files
//!
//! Provides the `validate-dataset` and `validate-report` binaries. Both
//! share one argument shape and one control flow:
//!
//! ```bash
//! validate-dataset [--debug] [--schema PATH] FILENAME...
//! validate-report  [--debug] [--schema PATH] FILENAME...
//! ```
//!
//! The schema is loaded once, then each file is read, decoded, optionally
//! dumped and validated in command-line order. The first failing file stops
//! the run; later files are never opened.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; decoding and validation are delegated to
//!   `dnsmag-schema`.
//! - Handlers return `anyhow::Result`; only the binaries choose the exit code.

pub mod dataset;
pub mod report;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing_subscriber::EnvFilter;

/// Directory holding schema resources, relative to the installation root.
pub const SCHEMA_DIR: &str = "schema";

/// Arguments shared by both validators.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Enable debug logging and dump each document before validating it.
    #[arg(long)]
    pub debug: bool,

    /// Schema document to validate against, instead of the installed one.
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Input files, validated in order.
    #[arg(value_name = "FILENAME", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,
}

/// Install the global tracing subscriber. Logs go to stderr so that the
/// debug dump on stdout stays clean.
pub fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Locate the schema resource `file_name`.
///
/// Uses `--schema` when given. Otherwise looks for `schema/<file_name>` under
/// the installation root: the directory holding the running executable or
/// the nearest of its ancestors that has a `schema/` directory with the file.
pub fn resolve_schema_path(args: &ValidateArgs, file_name: &str) -> Result<PathBuf> {
    if let Some(ref path) = args.schema {
        return Ok(path.clone());
    }

    let exe = std::env::current_exe().context("cannot determine the executable location")?;
    let Some(exe_dir) = exe.parent() else {
        bail!("executable {} has no parent directory", exe.display());
    };

    match find_schema_upwards(exe_dir, file_name) {
        Some(found) => {
            tracing::info!(schema = %found.display(), "using installed schema");
            Ok(found)
        }
        None => bail!(
            "schema resource {SCHEMA_DIR}/{file_name} not found above {}; pass --schema to locate it",
            exe_dir.display()
        ),
    }
}

/// Walk up from `start` looking for `schema/<file_name>`.
fn find_schema_upwards(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(SCHEMA_DIR).join(file_name))
        .find(|candidate| candidate.is_file())
}
