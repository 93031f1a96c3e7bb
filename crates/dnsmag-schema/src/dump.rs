//! # Debug Dumps
//!
//! Human-readable renderings of decoded documents, printed before validation
//! when a validator runs with `--debug`.
//!
//! CBOR datasets are walked key by key. Nested maps are announced as `(map)`
//! and expanded four spaces deeper; byte strings print their length only,
//! since HyperLogLog registers are unreadable and large. JSON reports are
//! pretty-printed with four-space indentation.

use std::io::{self, Write};

use ciborium::value::Value;
use serde::Serialize;

const INDENT_STEP: usize = 4;

/// CBOR tag for an RFC 8943 full-date string.
const TAG_FULL_DATE: u64 = 1004;

/// Write the structure of a decoded CBOR document.
///
/// A top-level map produces one `Key: .., Value: ..` line per entry. Any
/// other top-level value is written on a single `Value: ..` line.
pub fn dump_cbor<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    match value {
        Value::Map(entries) => dump_map(out, entries, 0),
        other => writeln!(out, "Value: {}", render(other)),
    }
}

fn dump_map<W: Write>(out: &mut W, entries: &[(Value, Value)], indent: usize) -> io::Result<()> {
    let pad = " ".repeat(indent);
    for (key, value) in entries {
        let key = render(key);
        match value {
            Value::Map(nested) => {
                writeln!(out, "{pad}Key: {key}, Value: (map)")?;
                dump_map(out, nested, indent + INDENT_STEP)?;
            }
            Value::Bytes(bytes) => {
                writeln!(out, "{pad}Key: {key}, Value: ({} bytes)", bytes.len())?;
            }
            other => writeln!(out, "{pad}Key: {key}, Value: {}", render(other))?,
        }
    }
    Ok(())
}

/// Render a scalar or container on one line.
///
/// Text is written bare at the top level; inside arrays and inline maps it
/// is quoted so that element boundaries stay visible.
fn render(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        other => render_nested(other),
    }
}

fn render_nested(value: &Value) -> String {
    match value {
        Value::Integer(i) => i128::from(*i).to_string(),
        Value::Float(f) => format!("{f:?}"),
        Value::Text(s) => format!("{s:?}"),
        Value::Bytes(b) => format!("({} bytes)", b.len()),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tag(TAG_FULL_DATE, inner) => match &**inner {
            Value::Text(date) => date.clone(),
            other => format!("{TAG_FULL_DATE}({})", render_nested(other)),
        },
        Value::Tag(tag, inner) => format!("{tag}({})", render_nested(inner)),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_nested).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", render_nested(k), render_nested(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        // `Value` is non-exhaustive.
        other => format!("{other:?}"),
    }
}

/// Pretty-print a JSON document with four-space indentation, followed by a
/// newline.
pub fn dump_json<W: Write>(out: &mut W, value: &serde_json::Value) -> io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut *out, formatter);
    value.serialize(&mut ser).map_err(io::Error::from)?;
    writeln!(out)
}
