//! FHIR Task resource model.
//!
//! Task inputs and outputs carry a polymorphic `value[x]` member. It is modelled as the closed
//! union [`TaskValue`], flattened into the parameter so that the JSON keeps the FHIR member name
//! (`valueString`, `valueReference`, ...).

use crate::codes::code_enum;
use crate::datatypes::{Annotation, CodeableConcept, Identifier, Period, Quantity, Reference};
use crate::{Resource, ResourceType};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

code_enum! {
    /// Task workflow status.
    TaskStatus {
        Draft => "draft",
        Requested => "requested",
        Received => "received",
        Accepted => "accepted",
        Rejected => "rejected",
        Ready => "ready",
        Cancelled => "cancelled",
        InProgress => "in-progress",
        OnHold => "on-hold",
        Failed => "failed",
        Completed => "completed",
        EnteredInError => "entered-in-error",
    }
}

code_enum! {
    /// Task intent.
    TaskIntent {
        Unknown => "unknown",
        Proposal => "proposal",
        Plan => "plan",
        Order => "order",
        OriginalOrder => "original-order",
        ReflexOrder => "reflex-order",
        FillerOrder => "filler-order",
        InstanceOrder => "instance-order",
        Option => "option",
    }
}

code_enum! {
    /// Task priority.
    TaskPriority {
        Routine => "routine",
        Urgent => "urgent",
        Asap => "asap",
        Stat => "stat",
    }
}

/// Value of a task input or output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TaskValue {
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueInteger")]
    Integer(i64),
    #[serde(rename = "valueDecimal")]
    Decimal(Number),
    #[serde(rename = "valueDateTime")]
    DateTime(String),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueReference")]
    Reference(Reference),
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
}

/// A typed input or output of a task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskParameter {
    #[serde(rename = "type", default)]
    pub type_concept: CodeableConcept,

    #[serde(flatten)]
    pub value: TaskValue,

    /// Members not modelled above. Declared after `value` so the `value[x]` member is claimed
    /// first.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl TaskParameter {
    pub fn new(type_concept: CodeableConcept, value: TaskValue) -> Self {
        Self {
            type_concept,
            value,
            other: BTreeMap::new(),
        }
    }
}

/// FHIR Task resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "resourceType", default = "Task::default_resource_type")]
    pub resource_type: ResourceType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<TaskIntent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Reference>,

    #[serde(rename = "for", skip_serializing_if = "Option::is_none")]
    pub for_subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authored_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input: Vec<TaskParameter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<TaskParameter>,

    /// Members not modelled above, carried through unchanged.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Task {
    fn default_resource_type() -> ResourceType {
        ResourceType::Task
    }
}

impl Default for Task {
    fn default() -> Self {
        Self {
            resource_type: ResourceType::Task,
            id: None,
            identifier: Vec::new(),
            status: None,
            intent: None,
            priority: None,
            code: None,
            description: None,
            focus: None,
            for_subject: None,
            execution_period: None,
            authored_on: None,
            last_modified: None,
            requester: None,
            owner: None,
            note: Vec::new(),
            input: Vec::new(),
            output: Vec::new(),
            other: BTreeMap::new(),
        }
    }
}

impl Resource for Task {
    const RESOURCE_TYPE: ResourceType = ResourceType::Task;

    fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
