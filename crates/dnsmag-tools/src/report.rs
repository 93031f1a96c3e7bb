//! # Report Validator
//!
//! Checks JSON magnitude reports against `schema/report-schema.json`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use dnsmag_schema::dump::dump_json;
use dnsmag_schema::{parse_report, read_document, ReportSchema, REPORT_SCHEMA_FILE};

use crate::{resolve_schema_path, ValidateArgs};

/// Execute the report validator. Debug dumps are written to `out`.
///
/// Stops at the first file that cannot be read, parsed or validated.
pub fn run_report<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<()> {
    let schema_path = resolve_schema_path(args, REPORT_SCHEMA_FILE)?;
    let schema = ReportSchema::from_file(&schema_path).context("failed to load report schema")?;

    tracing::debug!(
        schema = schema.schema_name(),
        path = %schema_path.display(),
        "loaded report schema"
    );

    let total = args.input.len();
    for (index, path) in args.input.iter().enumerate() {
        validate_report_file(&schema, path, args.debug, out)
            .with_context(|| format!("{} (file {} of {total})", path.display(), index + 1))?;
    }

    tracing::info!(files = total, "all reports valid");
    Ok(())
}

/// Read, parse, optionally dump, and validate one report file.
pub fn validate_report_file<W: Write>(
    schema: &ReportSchema,
    path: &Path,
    debug: bool,
    out: &mut W,
) -> Result<()> {
    tracing::debug!(file = %path.display(), "validating report");

    let bytes = read_document(path)?;
    let report = parse_report(&bytes)?;

    if debug {
        dump_json(out, &report).context("failed to write report dump")?;
    }

    schema.validate(&report)?;
    Ok(())
}
