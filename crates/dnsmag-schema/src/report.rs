//! # Report Schema (JSON Schema Draft 2020-12)
//!
//! Validation of JSON magnitude reports. The validator is compiled once from
//! the schema document with Draft 2020-12 semantics and format assertions
//! enabled, so a `date` or `uuid` that does not match its declared format is
//! a violation rather than an annotation.

use std::fmt;
use std::path::Path;

use jsonschema::{Draft, Validator};
use serde_json::Value;

use crate::dataset::schema_name_of;
use crate::error::{read_schema_source, SchemaValidationError, ValidationViolations, Violation};

/// Schema filename of the report JSON Schema resource.
pub const REPORT_SCHEMA_FILE: &str = "report-schema.json";

/// A compiled JSON Schema for magnitude reports.
pub struct ReportSchema {
    schema_name: String,
    validator: Validator,
}

impl ReportSchema {
    /// Load a JSON Schema document from a file and compile it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the file cannot be
    /// read or is not JSON, and `SchemaValidationError::ValidatorBuildError`
    /// if the document is not a valid Draft 2020-12 schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let path = path.as_ref();
        let schema_name = schema_name_of(path);
        let content = read_schema_source(path)?;
        let schema: Value =
            serde_json::from_str(&content).map_err(|e| SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::from_value(schema_name, &schema)
    }

    /// Compile an already parsed schema document.
    pub fn from_value(
        schema_name: impl Into<String>,
        schema: &Value,
    ) -> Result<Self, SchemaValidationError> {
        let schema_name = schema_name.into();
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            schema_name,
            validator,
        })
    }

    /// Returns the schema name (the resource filename when loaded from disk).
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Validate a parsed report.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` listing every
    /// violation, each carrying the JSON Pointer of the failing element.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations::new(errors),
            })
        }
    }
}

impl fmt::Debug for ReportSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportSchema")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

/// Parse a byte buffer as JSON text.
pub fn parse_report(bytes: &[u8]) -> Result<Value, SchemaValidationError> {
    serde_json::from_slice(bytes).map_err(|e| SchemaValidationError::DocumentDecodeError {
        format: "JSON",
        reason: e.to_string(),
    })
}
