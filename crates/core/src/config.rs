//! Core runtime configuration.
//!
//! Configuration is resolved once by the host application and passed into the
//! [`crate::store::TemplateStore`]. Nothing in this crate reads environment variables.

use crate::constants::{DEFAULT_IDENTIFIER_SYSTEM, EXPORT_FILE_PREFIX, EXPORT_VERSION};
use crate::validation::{validate_file_prefix, validate_identifier_system_uri};
use crate::CoreResult;
use care_types::NonEmptyText;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    identifier_system: String,
    export_version: String,
    export_file_prefix: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            identifier_system: DEFAULT_IDENTIFIER_SYSTEM.to_owned(),
            export_version: EXPORT_VERSION.to_owned(),
            export_file_prefix: EXPORT_FILE_PREFIX.to_owned(),
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Values are trimmed. The identifier system must be an absolute URI and the file prefix
    /// must be safe to embed in a file name.
    pub fn new(
        identifier_system: &str,
        export_version: &str,
        export_file_prefix: &str,
    ) -> CoreResult<Self> {
        let identifier_system = NonEmptyText::new(identifier_system)?.into_inner();
        let export_version = NonEmptyText::new(export_version)?.into_inner();
        let export_file_prefix = NonEmptyText::new(export_file_prefix)?.into_inner();

        validate_identifier_system_uri(&identifier_system)?;
        validate_file_prefix(&export_file_prefix)?;

        Ok(Self {
            identifier_system,
            export_version,
            export_file_prefix,
        })
    }

    pub fn identifier_system(&self) -> &str {
        &self.identifier_system
    }

    pub fn export_version(&self) -> &str {
        &self.export_version
    }

    pub fn export_file_prefix(&self) -> &str {
        &self.export_file_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn default_matches_interchange_constants() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.identifier_system(), DEFAULT_IDENTIFIER_SYSTEM);
        assert_eq!(cfg.export_version(), "1.0");
        assert_eq!(cfg.export_file_prefix(), "healthcare-cms-templates");
    }

    #[test]
    fn new_trims_and_validates() {
        let cfg = CoreConfig::new(" urn:example:ids ", "2.0", "ward-7").expect("valid config");
        assert_eq!(cfg.identifier_system(), "urn:example:ids");
        assert_eq!(cfg.export_version(), "2.0");
        assert_eq!(cfg.export_file_prefix(), "ward-7");
    }

    #[test]
    fn new_rejects_blank_version() {
        let err = CoreConfig::new("urn:example:ids", "  ", "ward-7").expect_err("blank version");
        assert!(matches!(err, CoreError::Text(_)));
    }

    #[test]
    fn new_rejects_relative_system_and_unsafe_prefix() {
        let err = CoreConfig::new("ids", "1.0", "ward-7").expect_err("relative system");
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = CoreConfig::new("urn:x:y", "1.0", "../ward").expect_err("unsafe prefix");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
