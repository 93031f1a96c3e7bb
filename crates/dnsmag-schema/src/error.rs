//! # Error Types
//!
//! One error enum covers every way a schema or a document can be rejected.
//! The variants follow the order in which a validator run can fail: schema
//! load, document read, document decode, schema conformance.

use std::fmt;

use thiserror::Error;

/// Error raised while loading a schema or validating a document against it.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema resource could not be read or parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema parsed but could not be compiled into a validator.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The document file could not be opened or read.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The document bytes are not well-formed in their encoding.
    #[error("invalid {format} document: {reason}")]
    DocumentDecodeError {
        /// Encoding the bytes were decoded as (`CBOR` or `JSON`).
        format: &'static str,
        /// Decoder error message.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Location of the violating element in the instance. A JSON Pointer for
    /// reports, a CBOR path for datasets.
    pub instance_path: String,
    /// Location within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations, in the order the validator reported
/// them.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the first reported violation.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Read a whole document into memory, mapping I/O failures to
/// [`SchemaValidationError::DocumentLoadError`].
pub fn read_document(path: &std::path::Path) -> Result<Vec<u8>, SchemaValidationError> {
    std::fs::read(path).map_err(|e| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })
}

/// Read a schema resource as UTF-8 text.
pub(crate) fn read_schema_source(path: &std::path::Path) -> Result<String, SchemaValidationError> {
    std::fs::read_to_string(path).map_err(|e| SchemaValidationError::SchemaLoadError {
        schema_name: path.display().to_string(),
        reason: format!("cannot read schema file: {e}"),
    })
}
