//! General-purpose FHIR data types shared by the Goal, Task and CarePlan models.
//!
//! Date and dateTime values are kept as their FHIR text form: FHIR allows partial dates
//! (`2026`, `2026-03`) which a `chrono` type cannot carry without loss. Numbers are kept as
//! JSON numbers so `5` and `5.0` render back as written.
//!
//! Every type keeps members it does not model (`extension`, `Reference.identifier`,
//! `Quantity.comparator`, ...) in `other`.

use crate::codes::code_enum;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

code_enum! {
    /// Purpose of an identifier.
    IdentifierUse {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Secondary => "secondary",
        Old => "old",
    }
}

/// A business identifier for a record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<IdentifierUse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}


/// A code defined by a terminology system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}


/// A concept that may be defined by codings and/or free text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}


impl CodeableConcept {
    /// The concept's text, treating whitespace-only text as absent.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A reference from one resource to another.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Literal reference, `"<Type>/<id>"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}


impl Reference {
    /// The literal reference, treating whitespace-only values as absent.
    pub fn reference(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// A time range defined by start and/or end.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}


/// A measured amount.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}


/// A text note with optional authorship.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_string: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_uses_fhir_member_names() {
        let identifier = Identifier {
            use_type: Some(IdentifierUse::Usual),
            system: Some("urn:example".into()),
            value: Some("abc".into()),
            ..Identifier::default()
        };
        let json = serde_json::to_value(&identifier).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"use": "usual", "system": "urn:example", "value": "abc"})
        );
    }

    #[test]
    fn reference_omits_absent_members() {
        let reference = Reference {
            reference: Some("Goal/g1".into()),
            type_name: Some("Goal".into()),
            display: None,
            ..Reference::default()
        };
        let json = serde_json::to_string(&reference).expect("serialize");
        assert_eq!(json, r#"{"reference":"Goal/g1","type":"Goal"}"#);
    }

    #[test]
    fn blank_text_and_reference_read_as_absent() {
        let concept = CodeableConcept {
            text: Some("   ".into()),
            ..CodeableConcept::default()
        };
        assert_eq!(concept.text(), None);

        let reference = Reference {
            reference: Some(String::new()),
            ..Reference::default()
        };
        assert_eq!(reference.reference(), None);
    }

    #[test]
    fn annotation_reads_author_string() {
        let note: Annotation =
            serde_json::from_str(r#"{"text":"Walk daily","authorString":"Dr Smith"}"#)
                .expect("deserialize");
        assert_eq!(note.text, "Walk daily");
        assert_eq!(note.author_string.as_deref(), Some("Dr Smith"));
        assert!(note.time.is_none());
    }

    #[test]
    fn unmodelled_members_survive_a_round_trip() {
        let input = serde_json::json!({
            "reference": "Patient/p1",
            "identifier": { "system": "urn:mrn", "value": "MRN1" },
            "extension": [{ "url": "urn:ext", "valueString": "x" }]
        });

        let reference: Reference = serde_json::from_value(input.clone()).expect("deserialize");
        assert_eq!(reference.reference(), Some("Patient/p1"));
        assert_eq!(serde_json::to_value(&reference).expect("serialize"), input);
    }

    #[test]
    fn quantity_keeps_number_form_and_comparator() {
        let input = serde_json::json!({ "value": 5, "comparator": ">=", "unit": "km" });
        let quantity: Quantity = serde_json::from_value(input.clone()).expect("deserialize");

        assert_eq!(quantity.value, Some(Number::from(5)));
        assert_eq!(quantity.other["comparator"], ">=");
        assert_eq!(
            serde_json::to_string(&quantity).expect("serialize"),
            r#"{"value":5,"unit":"km","comparator":">="}"#
        );
    }

    #[test]
    fn annotation_without_text_renders_without_text() {
        let input = serde_json::json!({ "authorReference": { "reference": "Practitioner/pr1" } });
        let note: Annotation = serde_json::from_value(input.clone()).expect("deserialize");
        assert_eq!(serde_json::to_value(&note).expect("serialize"), input);
    }
}
