//! Constants used throughout the core crate.
//!
//! Interchange defaults live here so that exports and file naming stay consistent.

/// Version tag written into every export payload.
pub const EXPORT_VERSION: &str = "1.0";

/// File name prefix for exported template batches.
pub const EXPORT_FILE_PREFIX: &str = "healthcare-cms-templates";

/// File extension for exported template batches.
pub const EXPORT_FILE_EXTENSION: &str = "json";

/// MIME type of exported template batches.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Default system URI for identifiers stamped by the store.
pub const DEFAULT_IDENTIFIER_SYSTEM: &str = fhir::DEFAULT_IDENTIFIER_SYSTEM;
