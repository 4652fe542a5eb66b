//! FHIR CarePlan resource model.
//!
//! In the editor a CarePlan's `goal` list and the reference-bearing entries of its `activity`
//! list are derived from the template's referenced Goal and Task ids; see the projection in the
//! core crate. Activities that carry an inline `detail` are authored content and are kept.

use crate::codes::code_enum;
use crate::datatypes::{Annotation, CodeableConcept, Identifier, Period, Reference};
use crate::{Resource, ResourceType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

code_enum! {
    /// CarePlan request status.
    CarePlanStatus {
        Draft => "draft",
        Active => "active",
        OnHold => "on-hold",
        Revoked => "revoked",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

code_enum! {
    /// CarePlan intent.
    CarePlanIntent {
        Proposal => "proposal",
        Plan => "plan",
        Order => "order",
        Option => "option",
        Directive => "directive",
    }
}

code_enum! {
    /// Status of an inline planned activity.
    ActivityStatus {
        NotStarted => "not-started",
        Scheduled => "scheduled",
        InProgress => "in-progress",
        OnHold => "on-hold",
        Completed => "completed",
        Cancelled => "cancelled",
        Stopped => "stopped",
        Unknown => "unknown",
        EnteredInError => "entered-in-error",
    }
}

/// Inline definition of a planned activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Goals this activity contributes to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goal: Vec<Reference>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// An action planned as part of the care plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanActivity {
    /// Activity defined elsewhere, typically a `Task/<id>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ActivityDetail>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub progress: Vec<Annotation>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl CarePlanActivity {
    /// An activity that only points at another resource.
    pub fn from_reference(reference: Reference) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }
}

/// FHIR CarePlan resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
    #[serde(rename = "resourceType", default = "CarePlan::default_resource_type")]
    pub resource_type: ResourceType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CarePlanStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<CarePlanIntent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goal: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activity: Vec<CarePlanActivity>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,

    /// Members not modelled above, carried through unchanged.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl CarePlan {
    fn default_resource_type() -> ResourceType {
        ResourceType::CarePlan
    }
}

impl Default for CarePlan {
    fn default() -> Self {
        Self {
            resource_type: ResourceType::CarePlan,
            id: None,
            identifier: Vec::new(),
            status: None,
            intent: None,
            category: Vec::new(),
            title: None,
            description: None,
            subject: None,
            period: None,
            created: None,
            author: None,
            addresses: Vec::new(),
            goal: Vec::new(),
            activity: Vec::new(),
            note: Vec::new(),
            other: BTreeMap::new(),
        }
    }
}

impl Resource for CarePlan {
    const RESOURCE_TYPE: ResourceType = ResourceType::CarePlan;

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
    use serde_json::json;

    #[test]
    fn parses_activities_with_reference_and_detail() {
        let input = r#"{
  "resourceType": "CarePlan",
  "status": "active",
  "intent": "plan",
  "subject": { "reference": "Patient/p1" },
  "goal": [ { "reference": "Goal/g1", "type": "Goal", "display": "Improve mobility" } ],
  "activity": [
    { "reference": { "reference": "Task/t1", "type": "Task" } },
    {
      "detail": {
        "kind": "ServiceRequest",
        "status": "not-started",
        "description": "Physiotherapy referral",
        "goal": [ { "reference": "Goal/g1" } ],
        "scheduledString": "weekly"
      }
    }
  ]
}"#;

        let plan = CarePlan::parse(input).expect("parse care plan");
        assert_eq!(plan.status, Some(CarePlanStatus::Active));
        assert_eq!(plan.intent, Some(CarePlanIntent::Plan));
        assert_eq!(plan.goal[0].display.as_deref(), Some("Improve mobility"));
        assert_eq!(plan.activity.len(), 2);

        let detail = plan.activity[1].detail.as_ref().expect("detail");
        assert_eq!(detail.status, Some(ActivityStatus::NotStarted));
        assert_eq!(detail.goal[0].reference(), Some("Goal/g1"));
        assert_eq!(detail.other["scheduledString"], json!("weekly"));
    }

    #[test]
    fn empty_goal_and_activity_lists_are_omitted() {
        let plan = CarePlan {
            status: Some(CarePlanStatus::Draft),
            intent: Some(CarePlanIntent::Proposal),
            ..CarePlan::default()
        };
        let value = serde_json::to_value(&plan).expect("serialize");
        assert_eq!(
            value,
            json!({"resourceType": "CarePlan", "status": "draft", "intent": "proposal"})
        );
    }

    #[test]
    fn activity_from_reference_has_no_detail() {
        let activity = CarePlanActivity::from_reference(Reference {
            reference: Some("Task/t1".into()),
            ..Reference::default()
        });
        let value = serde_json::to_value(&activity).expect("serialize");
        assert_eq!(value, json!({"reference": {"reference": "Task/t1"}}));
    }
}
