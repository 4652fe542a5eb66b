//! Templates: user-authored wrappers around one FHIR record.
//!
//! A template adds a display name, a free-text description and creation/update timestamps to
//! its record. CarePlan templates also carry the ordered ids of the Goal and Task templates they
//! reference; the CarePlan record's `goal`/`activity` lists are projected from those ids (see
//! [`crate::projection`]).
//!
//! Templates are created from *drafts* (a template without id or timestamps) by the store.
//! Timestamps serialise as ISO-8601 UTC with millisecond precision, which is also the precision
//! the store stamps them with, so an export/import round trip reproduces them exactly.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use fhir::{CarePlan, Goal, ResourceType, Task, Validate, ValidationResult};
use serde::{Deserialize, Serialize};

/// Common access to the three template kinds.
pub trait Template: Clone {
    /// Template contents before the store assigns an id and timestamps.
    type Draft;

    /// The embedded record type.
    type Record: Validate;

    /// Resource type of the embedded record.
    const KIND: ResourceType;

    /// Build a template from a draft with the given id and creation time.
    fn from_draft(draft: Self::Draft, id: String, now: DateTime<Utc>) -> Self;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn record(&self) -> &Self::Record;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Keep the original creation time and record a new update time.
    fn stamp_update(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);

    /// Check the embedded record's required fields.
    fn validate(&self) -> ValidationResult {
        self.record().validate()
    }
}

/// Current time at interchange precision, strictly after `previous` when given.
pub(crate) fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(3);
    match previous {
        Some(prev) if now <= prev => prev.trunc_subsecs(3) + Duration::milliseconds(1),
        _ => now,
    }
}

/// Serde adapter for template timestamps: `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{text}': {e}")))
    }
}

// ============================================================================
// Goal templates
// ============================================================================

/// A Goal template before it is added to the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalDraft {
    pub name: String,
    pub description: String,
    pub record: Goal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub record: Goal,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Template for GoalTemplate {
    type Draft = GoalDraft;
    type Record = Goal;
    const KIND: ResourceType = ResourceType::Goal;

    fn from_draft(draft: GoalDraft, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            record: draft.record,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn record(&self) -> &Goal {
        &self.record
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_update(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}

// ============================================================================
// Task templates
// ============================================================================

/// A Task template before it is added to the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub record: Task,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub record: Task,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Template for TaskTemplate {
    type Draft = TaskDraft;
    type Record = Task;
    const KIND: ResourceType = ResourceType::Task;

    fn from_draft(draft: TaskDraft, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            record: draft.record,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn record(&self) -> &Task {
        &self.record
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_update(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}

// ============================================================================
// CarePlan templates
// ============================================================================

/// A CarePlan template before it is added to the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarePlanDraft {
    pub name: String,
    pub description: String,
    pub record: CarePlan,
    pub referenced_goals: Vec<String>,
    pub referenced_tasks: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub record: CarePlan,
    /// GoalTemplate ids, in display order. Soft references.
    #[serde(default)]
    pub referenced_goals: Vec<String>,
    /// TaskTemplate ids, in display order. Soft references.
    #[serde(default)]
    pub referenced_tasks: Vec<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Template for CarePlanTemplate {
    type Draft = CarePlanDraft;
    type Record = CarePlan;
    const KIND: ResourceType = ResourceType::CarePlan;

    fn from_draft(draft: CarePlanDraft, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            record: draft.record,
            referenced_goals: draft.referenced_goals,
            referenced_tasks: draft.referenced_tasks,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn record(&self) -> &CarePlan {
        &self.record
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_update(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}
