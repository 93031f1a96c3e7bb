//! # dnsmag-schema: Schema Validation for DNS Magnitude Files
//!
//! Schema handles and document decoding for the two file formats produced
//! by the dnsmag collector:
//!
//! - **Datasets** are CBOR maps validated against a CDDL schema
//!   ([`DatasetSchemaSource`] parsed into a [`DatasetSchema`]). Decoded
//!   values keep their CBOR tags, so tags are checked as written.
//! - **Reports** are JSON objects validated against a JSON Schema Draft
//!   2020-12 document with format assertions enabled ([`ReportSchema`]).
//!
//! The [`dump`] module renders decoded documents for `--debug` output.
//!
//! ## Crate Policy
//!
//! - A schema handle is built once and used read-only; there is no global
//!   schema state.
//! - Every failure is returned as a [`SchemaValidationError`]; nothing in
//!   this crate prints or exits.

pub mod dataset;
pub mod dump;
pub mod error;
pub mod report;

pub use dataset::{decode_cbor, DatasetSchema, DatasetSchemaSource, DATASET_SCHEMA_FILE};
pub use error::{read_document, SchemaValidationError, ValidationViolations, Violation};
pub use report::{parse_report, ReportSchema, REPORT_SCHEMA_FILE};
