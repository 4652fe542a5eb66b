//! Identifier generation for templates and record identifiers.
//!
//! Two kinds of identifier are produced here:
//!
//! - **Random tokens** ([`UuidService`]): a UUIDv4 in *canonical* form, **32 lowercase
//!   hexadecimal characters** (no hyphens). Used as the `value` of generated record
//!   identifiers.
//! - **Template ids** ([`TemplateId`]): a time-prefixed token of the form
//!   `YYYYMMDDTHHMMSS.mmmZ-<canonical_uuid>`. The prefix keeps ids roughly sortable by creation
//!   time; the UUID suffix makes collisions negligible.
//!
//! ## Canonical UUID form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Template ids only use characters permitted in a FHIR `id` (`[A-Za-z0-9\-\.]`), and at 53
//! characters they fit within the 64 character limit, so a template id can also be used as the
//! id part of a `"Type/id"` reference.

mod service;

// Re-export public types
pub use service::{TemplateId, Uuid, UuidService};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
