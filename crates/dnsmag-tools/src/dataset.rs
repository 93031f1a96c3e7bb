//! # Dataset Validator
//!
//! Checks CBOR magnitude datasets against `schema/dataset.cddl`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use dnsmag_schema::dump::dump_cbor;
use dnsmag_schema::{
    decode_cbor, read_document, DatasetSchema, DatasetSchemaSource, DATASET_SCHEMA_FILE,
};

use crate::{resolve_schema_path, ValidateArgs};

/// Execute the dataset validator. Debug dumps are written to `out`.
///
/// Stops at the first file that cannot be read, decoded or validated.
pub fn run_dataset<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<()> {
    let schema_path = resolve_schema_path(args, DATASET_SCHEMA_FILE)?;
    let source =
        DatasetSchemaSource::from_file(&schema_path).context("failed to load dataset schema")?;
    let schema = source.parse().context("failed to load dataset schema")?;

    tracing::debug!(
        schema = schema.schema_name(),
        path = %schema_path.display(),
        "loaded dataset schema"
    );

    let total = args.input.len();
    for (index, path) in args.input.iter().enumerate() {
        validate_dataset_file(&schema, path, args.debug, out)
            .with_context(|| format!("{} (file {} of {total})", path.display(), index + 1))?;
    }

    tracing::info!(files = total, "all datasets valid");
    Ok(())
}

/// Read, decode, optionally dump, and validate one dataset file.
///
/// A malformed file fails while decoding, before it is dumped or the schema
/// is consulted. The schema sees the raw bytes, not the dumped value.
pub fn validate_dataset_file<W: Write>(
    schema: &DatasetSchema<'_>,
    path: &Path,
    debug: bool,
    out: &mut W,
) -> Result<()> {
    tracing::debug!(file = %path.display(), "validating dataset");

    let bytes = read_document(path)?;
    let value = decode_cbor(&bytes)?;

    if debug {
        dump_cbor(out, &value).context("failed to write dataset dump")?;
    }

    schema.validate_cbor(&bytes)?;

    tracing::debug!(file = %path.display(), bytes = bytes.len(), "dataset valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciborium::value::Value;
    use std::path::PathBuf;

    fn installed_schema() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates/
        dir.pop(); // repo root
        dir.join("schema").join(DATASET_SCHEMA_FILE)
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn dataset(queries: Value) -> Value {
        Value::Map(vec![
            (text("version"), Value::Integer(1.into())),
            (text("id"), text("5a0e3c1d-2b4f-4c6a-8e9d-7f1a2b3c4d5e")),
            (text("generator"), text("dnsmag v0.1.0")),
            (text("date"), Value::Tag(1004, Box::new(text("2025-03-01")))),
            (text("all_clients_hll"), Value::Bytes(vec![0x14, 0x8e, 0x00])),
            (text("all_clients_count"), Value::Integer(3.into())),
            (text("all_queries_count"), queries),
            (
                text("domains"),
                Value::Map(vec![(
                    text("org"),
                    Value::Map(vec![
                        (text("clients_hll"), Value::Bytes(vec![0x14, 0x8e, 0x01, 0x02])),
                        (text("clients_count"), Value::Integer(3.into())),
                        (text("queries_count"), Value::Integer(9.into())),
                    ]),
                )]),
            ),
        ])
    }

    fn write_cbor(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(value, &mut bytes).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn args(input: Vec<PathBuf>, debug: bool) -> ValidateArgs {
        ValidateArgs {
            debug,
            schema: Some(installed_schema()),
            input,
        }
    }

    #[test]
    fn run_dataset_accepts_valid_files_silently() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_cbor(dir.path(), "a.cbor", &dataset(Value::Integer(9.into())));
        let b = write_cbor(dir.path(), "b.cbor", &dataset(Value::Integer(12.into())));

        let mut out = Vec::new();
        run_dataset(&args(vec![a, b], false), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn run_dataset_debug_dumps_before_validating() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_cbor(dir.path(), "a.cbor", &dataset(Value::Integer(9.into())));

        let mut out = Vec::new();
        run_dataset(&args(vec![a], true), &mut out).unwrap();
        let dump = String::from_utf8(out).unwrap();
        assert!(dump.contains("Key: version, Value: 1\n"));
        assert!(dump.contains("Key: all_clients_hll, Value: (3 bytes)\n"));
        assert!(dump.contains("Key: domains, Value: (map)\n    Key: org, Value: (map)\n"));
        assert!(dump.contains("        Key: clients_hll, Value: (4 bytes)\n"));
    }

    #[test]
    fn debug_does_not_change_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_cbor(dir.path(), "bad.cbor", &dataset(text("nine")));

        for debug in [false, true] {
            let mut out = Vec::new();
            let err = run_dataset(&args(vec![bad.clone()], debug), &mut out).unwrap_err();
            let message = format!("{err:#}");
            assert!(message.contains("validation failed"));
            assert!(message.contains("all_queries_count"), "{message}");
            // The dump is written before validation rejects the file.
            assert_eq!(out.is_empty(), !debug);
        }
    }

    #[test]
    fn run_dataset_stops_at_first_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_cbor(dir.path(), "good.cbor", &dataset(Value::Integer(9.into())));
        let bad = write_cbor(dir.path(), "bad.cbor", &dataset(text("nine")));
        let never = dir.path().join("never-opened.cbor");

        let mut out = Vec::new();
        let err = run_dataset(&args(vec![good, bad, never], false), &mut out).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("bad.cbor (file 2 of 3)"), "{message}");
        assert!(message.contains("validation failed against schema 'dataset.cddl'"));
        assert!(!message.contains("never-opened.cbor"));
    }

    #[test]
    fn run_dataset_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.cbor");

        let err = run_dataset(&args(vec![missing], false), &mut Vec::new()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("missing.cbor (file 1 of 1)"));
        assert!(message.contains("cannot read file"));
    }

    #[test]
    fn malformed_cbor_fails_before_dump_and_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.cbor");
        // map of 8 pairs, then a text key cut short
        std::fs::write(&path, [0xa8, 0x67, b'v', b'e', b'r']).unwrap();

        let mut out = Vec::new();
        let err = run_dataset(&args(vec![path], true), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("invalid CBOR document"));
        assert!(out.is_empty());
    }

    #[test]
    fn run_dataset_fails_without_schema() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_cbor(dir.path(), "a.cbor", &dataset(Value::Integer(9.into())));
        let args = ValidateArgs {
            debug: false,
            schema: Some(dir.path().join("absent.cddl")),
            input: vec![a],
        };

        let err = run_dataset(&args, &mut Vec::new()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("failed to load dataset schema"));
        assert!(message.contains("absent.cddl"));
    }
}
