//! FHIR-aligned record models for care plan templates.
//!
//! This crate provides the **record payloads** embedded in templates and the pure helpers that
//! operate on them:
//! - Goal, Task and CarePlan resources (FHIR R4 JSON field names, `resourceType` discriminator)
//! - identifier / reference / concept builders
//! - minimal required-field validators
//! - reverse reference lookup over CarePlans
//!
//! Only the subset of each resource that the editor works with is strongly typed. Every resource
//! keeps the remaining JSON members in an opaque pass-through map, so a record read from an
//! interchange file renders back with the same fields it arrived with.
//!
//! Full FHIR profile and schema validation is out of scope.

pub mod builders;
pub mod care_plan;
pub mod codes;
pub mod datatypes;
pub mod goal;
pub mod references;
pub mod task;
pub mod validation;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export public types
pub use builders::{
    create_codeable_concept_from_text, create_reference, generate_id, generate_identifier,
    generate_identifier_with_system, DEFAULT_IDENTIFIER_SYSTEM,
};
pub use care_plan::{
    ActivityDetail, ActivityStatus, CarePlan, CarePlanActivity, CarePlanIntent, CarePlanStatus,
};
pub use codes::Code;
pub use datatypes::{
    Annotation, CodeableConcept, Coding, Identifier, IdentifierUse, Period, Quantity, Reference,
};
pub use goal::{Goal, GoalLifecycleStatus, GoalTarget};
pub use references::{references_resource, ResourceRef};
pub use task::{Task, TaskIntent, TaskParameter, TaskPriority, TaskStatus, TaskValue};
pub use validation::{validate_care_plan, validate_goal, validate_task, Validate, ValidationResult};

/// Errors returned by the `fhir` crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// The resource types handled by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Goal,
    Task,
    CarePlan,
}

impl ResourceType {
    /// The FHIR resource type name, e.g. `"CarePlan"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Goal => "Goal",
            ResourceType::Task => "Task",
            ResourceType::CarePlan => "CarePlan",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Goal" => Ok(ResourceType::Goal),
            "Task" => Ok(ResourceType::Task),
            "CarePlan" => Ok(ResourceType::CarePlan),
            other => Err(FhirError::InvalidInput(format!(
                "unsupported resourceType '{other}'"
            ))),
        }
    }
}

/// Common behaviour of the record payloads.
///
/// `parse` and `render` are the single-record interchange operations. Parsing uses
/// `serde_path_to_error` so a schema mismatch names the failing field (e.g.
/// `input[0].valueInteger`).
pub trait Resource: Serialize + DeserializeOwned {
    /// The resource type this struct models.
    const RESOURCE_TYPE: ResourceType;

    /// The `resourceType` value carried by this instance.
    fn resource_type(&self) -> ResourceType;

    /// The logical id of the record, if it has one.
    fn id(&self) -> Option<&str>;

    /// Parse a record from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] if the JSON does not match the record schema and
    /// [`FhirError::InvalidInput`] if `resourceType` names a different resource.
    fn parse(json_text: &str) -> FhirResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let record: Self = match serde_path_to_error::deserialize(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FhirError::Translation(format!(
                    "{} schema mismatch at {path}: {source}",
                    Self::RESOURCE_TYPE
                )));
            }
        };
        deserializer.end()?;

        if record.resource_type() != Self::RESOURCE_TYPE {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType '{}', got '{}'",
                Self::RESOURCE_TYPE,
                record.resource_type()
            )));
        }

        Ok(record)
    }

    /// Render the record as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] if serialisation fails.
    fn render(&self) -> FhirResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            FhirError::Translation(format!(
                "Failed to serialise {}: {e}",
                Self::RESOURCE_TYPE
            ))
        })
    }
}
