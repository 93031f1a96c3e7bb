//! # Dataset Schema (CDDL)
//!
//! Validation of CBOR-encoded magnitude datasets against a CDDL schema.
//!
//! The schema text is owned by a [`DatasetSchemaSource`]; parsing it yields a
//! [`DatasetSchema`] that borrows from the source and holds the CDDL AST.
//! The AST is built once and reused for every dataset. Datasets are checked
//! as decoded `ciborium` values, which keep CBOR tags such as the 1004
//! full-date on `date`.

use std::fmt;
use std::path::Path;

use cddl::ast::CDDL;
use cddl::validator::{cbor, Validator};
use ciborium::value::Value;

use crate::error::{read_schema_source, SchemaValidationError, ValidationViolations, Violation};

/// Schema filename of the dataset CDDL resource.
pub const DATASET_SCHEMA_FILE: &str = "dataset.cddl";

/// The text of a CDDL schema, not yet parsed.
#[derive(Debug, Clone)]
pub struct DatasetSchemaSource {
    schema_name: String,
    text: String,
}

impl DatasetSchemaSource {
    /// Read a CDDL schema from a file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the file cannot be
    /// read as UTF-8 text.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let path = path.as_ref();
        let text = read_schema_source(path)?;
        Ok(Self::new(schema_name_of(path), text))
    }

    /// Wrap schema text held in memory.
    pub fn new(schema_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            text: text.into(),
        }
    }

    /// Parse the schema into a reusable handle.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the text is not
    /// valid CDDL.
    pub fn parse(&self) -> Result<DatasetSchema<'_>, SchemaValidationError> {
        let cddl = cddl::parser::cddl_from_str(&self.text, false).map_err(|reason| {
            SchemaValidationError::SchemaLoadError {
                schema_name: self.schema_name.clone(),
                reason: format!("invalid CDDL: {reason}"),
            }
        })?;

        Ok(DatasetSchema {
            schema_name: &self.schema_name,
            cddl,
        })
    }
}

/// A parsed CDDL schema for magnitude datasets.
pub struct DatasetSchema<'a> {
    schema_name: &'a str,
    cddl: CDDL<'a>,
}

impl<'a> DatasetSchema<'a> {
    /// Returns the schema name (the resource filename when loaded from disk).
    pub fn schema_name(&self) -> &str {
        self.schema_name
    }

    /// Validate a decoded CBOR value against the schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with one violation
    /// per CDDL mismatch, located by its CBOR path, or
    /// `SchemaValidationError::DocumentDecodeError` if a control operator
    /// could not decode embedded content.
    pub fn validate(&self, value: Value) -> Result<(), SchemaValidationError> {
        let mut validator = cbor::CBORValidator::new(&self.cddl, value, None);
        let result: Result<(), cbor::Error<std::io::Error>> = validator.validate();

        match result {
            Ok(()) => Ok(()),
            Err(cbor::Error::Validation(errors)) => {
                let violations = errors
                    .into_iter()
                    .map(|e| Violation {
                        instance_path: e.cbor_location,
                        schema_path: e.cddl_location,
                        message: e.reason,
                    })
                    .collect();
                Err(SchemaValidationError::ValidationFailed {
                    schema_name: self.schema_name.to_string(),
                    violations: ValidationViolations::new(violations),
                })
            }
            Err(other) => Err(SchemaValidationError::DocumentDecodeError {
                format: "CBOR",
                reason: other.to_string(),
            }),
        }
    }

    /// Validate raw CBOR bytes. The bytes are decoded into a fresh value; the
    /// parsed schema is reused.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::DocumentDecodeError` if the bytes are
    /// not well-formed CBOR, otherwise as [`DatasetSchema::validate`].
    pub fn validate_cbor(&self, bytes: &[u8]) -> Result<(), SchemaValidationError> {
        self.validate(decode_cbor(bytes)?)
    }
}

impl fmt::Debug for DatasetSchema<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetSchema")
            .field("schema_name", &self.schema_name)
            .field("rules", &self.cddl.rules.len())
            .finish()
    }
}

/// Decode a byte buffer as a single CBOR value.
pub fn decode_cbor(bytes: &[u8]) -> Result<Value, SchemaValidationError> {
    ciborium::de::from_reader(bytes).map_err(|e: ciborium::de::Error<std::io::Error>| {
        SchemaValidationError::DocumentDecodeError {
            format: "CBOR",
            reason: e.to_string(),
        }
    })
}

pub(crate) fn schema_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
