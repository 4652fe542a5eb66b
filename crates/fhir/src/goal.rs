//! FHIR Goal resource model.
//!
//! A Goal describes an intended objective for a patient (e.g. "Improve mobility"). The editor
//! requires `lifecycleStatus`, `description.text` and `subject.reference` before a Goal template
//! can be saved; see [`crate::validation::validate_goal`].

use crate::codes::code_enum;
use crate::datatypes::{Annotation, CodeableConcept, Identifier, Quantity, Reference};
use crate::{Resource, ResourceType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

code_enum! {
    /// Lifecycle state of a goal.
    GoalLifecycleStatus {
        Proposed => "proposed",
        Planned => "planned",
        Accepted => "accepted",
        Active => "active",
        OnHold => "on-hold",
        Completed => "completed",
        Cancelled => "cancelled",
        EnteredInError => "entered-in-error",
        Rejected => "rejected",
    }
}

/// Target outcome for a goal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_string: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// FHIR Goal resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(rename = "resourceType", default = "Goal::default_resource_type")]
    pub resource_type: ResourceType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle_status: Option<GoalLifecycleStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_status: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CodeableConcept>,

    #[serde(default)]
    pub description: CodeableConcept,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<GoalTarget>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expressed_by: Option<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,

    /// Members not modelled above, carried through unchanged.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Goal {
    fn default_resource_type() -> ResourceType {
        ResourceType::Goal
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self {
            resource_type: ResourceType::Goal,
            id: None,
            identifier: Vec::new(),
            lifecycle_status: None,
            achievement_status: None,
            category: Vec::new(),
            priority: None,
            description: CodeableConcept::default(),
            subject: None,
            start_date: None,
            target: Vec::new(),
            status_date: None,
            expressed_by: None,
            addresses: Vec::new(),
            note: Vec::new(),
            other: BTreeMap::new(),
        }
    }
}

impl Resource for Goal {
    const RESOURCE_TYPE: ResourceType = ResourceType::Goal;

    fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FhirError;

    #[test]
    fn parses_goal_with_targets_and_unmodelled_members() {
        let input = r#"{
  "resourceType": "Goal",
  "id": "goal-1",
  "lifecycleStatus": "on-hold",
  "description": { "text": "Improve mobility" },
  "subject": { "reference": "Patient/p1" },
  "target": [
    {
      "measure": { "text": "Steps per day" },
      "detailQuantity": { "value": 5000, "unit": "steps" },
      "dueDate": "2026-12-01"
    }
  ],
  "meta": { "versionId": "3" }
}"#;

        let goal = Goal::parse(input).expect("parse goal");
        assert_eq!(goal.id(), Some("goal-1"));
        assert_eq!(goal.lifecycle_status, Some(GoalLifecycleStatus::OnHold));
        assert_eq!(goal.description.text(), Some("Improve mobility"));
        let quantity = goal.target[0].detail_quantity.as_ref().expect("quantity");
        assert_eq!(quantity.value, Some(serde_json::Number::from(5000)));
        assert_eq!(goal.other["meta"], serde_json::json!({"versionId": "3"}));
    }

    #[test]
    fn render_keeps_unmodelled_members() {
        let mut goal = Goal::default();
        goal.other
            .insert("language".into(), Value::String("en-GB".into()));

        let rendered = goal.render().expect("render");
        assert!(rendered.contains("\"resourceType\": \"Goal\""));
        assert!(rendered.contains("\"language\": \"en-GB\""));

        let reparsed = Goal::parse(&rendered).expect("reparse");
        assert_eq!(reparsed, goal);
    }

    #[test]
    fn rejects_other_resource_types() {
        let err = Goal::parse(r#"{"resourceType":"Task","status":"draft"}"#)
            .expect_err("should reject Task");
        match err {
            FhirError::InvalidInput(msg) => {
                assert!(msg.contains("Goal"));
                assert!(msg.contains("Task"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_status_code_is_kept() {
        let input = r#"{"resourceType":"Goal","lifecycleStatus":"someday"}"#;
        let goal = Goal::parse(input).expect("parse goal");
        assert_eq!(
            goal.lifecycle_status,
            Some(GoalLifecycleStatus::Other("someday".into()))
        );

        let value: Value = serde_json::from_str(&goal.render().expect("render")).expect("json");
        assert_eq!(value["lifecycleStatus"], "someday");
    }

    #[test]
    fn reports_path_of_mistyped_status() {
        let err = Goal::parse(r#"{"resourceType":"Goal","lifecycleStatus":3}"#)
            .expect_err("status must be a string");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("lifecycleStatus")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn nested_unmodelled_members_survive_parse_and_render() {
        let input = serde_json::json!({
            "resourceType": "Goal",
            "description": {
                "text": "x",
                "extension": [{ "url": "urn:ext", "valueCode": "a" }]
            },
            "subject": { "reference": "Patient/p1", "identifier": { "value": "MRN1" } },
            "target": [
                { "detailQuantity": { "value": 5, "comparator": ">=" }, "detailRange": {} }
            ],
            "note": [{ "text": "n", "authorReference": { "reference": "Practitioner/pr1" } }]
        });

        let goal = Goal::parse(&input.to_string()).expect("parse goal");
        let rendered: Value =
            serde_json::from_str(&goal.render().expect("render")).expect("json");
        assert_eq!(rendered, input);
    }

    #[test]
    fn minimal_goal_renders_empty_description() {
        let rendered = Goal::default().render().expect("render");
        let value: Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(
            value,
            serde_json::json!({"resourceType": "Goal", "description": {}})
        );
    }
}
