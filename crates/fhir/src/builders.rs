//! Builders for identifiers, references and concepts.
//!
//! These are pure constructors apart from the random components of [`generate_identifier`] and
//! [`generate_id`].

use crate::datatypes::{CodeableConcept, Coding, Identifier, IdentifierUse, Reference};
use care_uuid::{TemplateId, UuidService};

/// System URI stamped on generated identifiers when no other system is configured.
pub const DEFAULT_IDENTIFIER_SYSTEM: &str = "https://healthcare-cms.local/identifiers";

/// Build a `usual` identifier under [`DEFAULT_IDENTIFIER_SYSTEM`].
///
/// When `value` is `None` a fresh random token (32 lowercase hex characters) is used.
pub fn generate_identifier(value: Option<&str>) -> Identifier {
    generate_identifier_with_system(DEFAULT_IDENTIFIER_SYSTEM, value)
}

/// Build a `usual` identifier under an explicit system URI.
pub fn generate_identifier_with_system(system: &str, value: Option<&str>) -> Identifier {
    let value = match value {
        Some(v) => v.to_owned(),
        None => UuidService::new().to_string(),
    };

    Identifier {
        use_type: Some(IdentifierUse::Usual),
        system: Some(system.to_owned()),
        value: Some(value),
        ..Identifier::default()
    }
}

/// Generate a template id: a millisecond timestamp prefix followed by a random UUID suffix.
///
/// Uniqueness is probabilistic; a collision is treated as a logic error by callers.
pub fn generate_id() -> String {
    TemplateId::generate(None).to_string()
}

/// Build a literal reference `"<type_name>/<id>"`.
pub fn create_reference(type_name: &str, id: &str, display: Option<&str>) -> Reference {
    Reference {
        reference: Some(format!("{type_name}/{id}")),
        type_name: Some(type_name.to_owned()),
        display: display.map(str::to_owned),
        ..Reference::default()
    }
}

/// Build a concept from free text.
///
/// A coding is attached only when both `system` and `code` are supplied; its display is the
/// concept text.
pub fn create_codeable_concept_from_text(
    text: &str,
    system: Option<&str>,
    code: Option<&str>,
) -> CodeableConcept {
    let coding = match (system, code) {
        (Some(system), Some(code)) => vec![Coding {
            system: Some(system.to_owned()),
            code: Some(code.to_owned()),
            display: Some(text.to_owned()),
            ..Coding::default()
        }],
        _ => Vec::new(),
    };

    CodeableConcept {
        coding,
        text: Some(text.to_owned()),
        ..CodeableConcept::default()
    }
}
