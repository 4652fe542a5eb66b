//! Input validation utilities for configuration values.
//!
//! Record validation (required FHIR fields) lives in the `fhir` crate; this module only guards
//! the values a host passes into [`crate::config::CoreConfig`].

use crate::{CoreError, CoreResult};

/// Validates that an identifier system is an absolute URI.
///
/// The check is syntactic: a scheme of ASCII letters, digits, `+`, `-` or `.` starting with a
/// letter, followed by `:` and a non-empty remainder without whitespace.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` if the system is not an absolute URI.
pub fn validate_identifier_system_uri(system: &str) -> CoreResult<()> {
    const MAX_SYSTEM_LEN: usize = 2048;

    if system.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "identifier system cannot be empty".into(),
        ));
    }

    if system.len() > MAX_SYSTEM_LEN {
        return Err(CoreError::InvalidInput(format!(
            "identifier system exceeds maximum length of {} characters",
            MAX_SYSTEM_LEN
        )));
    }

    if !system.is_ascii() || system.bytes().any(|b| b.is_ascii_whitespace()) {
        return Err(CoreError::InvalidInput(
            "identifier system must be ASCII without whitespace".into(),
        ));
    }

    let (scheme, rest) = system.split_once(':').ok_or_else(|| {
        CoreError::InvalidInput("identifier system must be an absolute URI".into())
    })?;

    let scheme_ok = scheme.bytes().next().is_some_and(|b| b.is_ascii_alphabetic())
        && scheme
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));

    if !scheme_ok || rest.is_empty() {
        return Err(CoreError::InvalidInput(
            "identifier system must be an absolute URI".into(),
        ));
    }

    Ok(())
}

/// Validates that an export file name prefix is safe to use in a file name.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` if the prefix is empty, too long or contains characters
/// outside ASCII alphanumerics, `.`, `-` and `_`.
pub fn validate_file_prefix(prefix: &str) -> CoreResult<()> {
    const MAX_PREFIX_LEN: usize = 128;

    if prefix.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "file prefix cannot be empty".into(),
        ));
    }

    if prefix.len() > MAX_PREFIX_LEN {
        return Err(CoreError::InvalidInput(format!(
            "file prefix exceeds maximum length of {} characters",
            MAX_PREFIX_LEN
        )));
    }

    let ok = prefix
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(CoreError::InvalidInput(
            "file prefix contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        ));
    }

    Ok(())
}
