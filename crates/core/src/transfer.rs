//! Export and import of templates.
//!
//! The interchange payload is a pretty-printed JSON document:
//!
//! ```text
//! {
//!   "goals": [ GoalTemplate, ... ],
//!   "tasks": [ TaskTemplate, ... ],
//!   "carePlans": [ CarePlanTemplate, ... ],
//!   "exportDate": "2026-10-16T08:00:00.000Z",
//!   "version": "1.0"
//! }
//! ```
//!
//! Import requires the three collection keys and nothing else; `exportDate` and `version` are
//! informational. Imported templates are not validated: incomplete records load as-is and only
//! surface as validation errors when edited and saved.
//!
//! Failures are returned as [`CoreError::Parse`] (with the JSON path of the mismatch) and
//! logged; nothing here panics on bad input.

use crate::constants::{EXPORT_FILE_EXTENSION, EXPORT_MIME_TYPE, EXPORT_VERSION};
use crate::templates::{timestamp, CarePlanTemplate, GoalTemplate, TaskTemplate};
use crate::{CoreError, CoreResult};
use chrono::{NaiveDate, Utc};
use fhir::Resource;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Borrowed export payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportPayload<'a> {
    goals: &'a [GoalTemplate],
    tasks: &'a [TaskTemplate],
    care_plans: &'a [CarePlanTemplate],
    export_date: String,
    version: &'a str,
}

/// An export ready to hand to a download or save dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// An imported set of templates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBatch {
    pub goals: Vec<GoalTemplate>,
    pub tasks: Vec<TaskTemplate>,
    pub care_plans: Vec<CarePlanTemplate>,
    #[serde(default)]
    pub export_date: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Render the three collections as an interchange payload tagged with the current version.
pub fn export_batch(
    goals: &[GoalTemplate],
    tasks: &[TaskTemplate],
    care_plans: &[CarePlanTemplate],
) -> CoreResult<String> {
    export_batch_versioned(goals, tasks, care_plans, EXPORT_VERSION)
}

/// Render the three collections as an interchange payload with an explicit version tag.
pub fn export_batch_versioned(
    goals: &[GoalTemplate],
    tasks: &[TaskTemplate],
    care_plans: &[CarePlanTemplate],
    version: &str,
) -> CoreResult<String> {
    let payload = ExportPayload {
        goals,
        tasks,
        care_plans,
        export_date: timestamp::format(&Utc::now()),
        version,
    };

    let text = serde_json::to_string_pretty(&payload).map_err(CoreError::Serialization)?;
    tracing::info!(
        goals = goals.len(),
        tasks = tasks.len(),
        care_plans = care_plans.len(),
        "exported templates"
    );
    Ok(text)
}

fn parse_json<T: DeserializeOwned>(text: &str, what: &str) -> CoreResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);

    let parsed: T = match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            let message = format!("{what} mismatch at {path}: {source}");
            tracing::warn!("{message}");
            return Err(CoreError::Parse(message));
        }
    };

    if let Err(e) = deserializer.end() {
        let message = format!("{what} has trailing content: {e}");
        tracing::warn!("{message}");
        return Err(CoreError::Parse(message));
    }

    Ok(parsed)
}

/// Parse an interchange payload.
///
/// # Errors
///
/// Returns [`CoreError::Parse`] if the text is not JSON, lacks `goals`, `tasks` or
/// `carePlans`, or a template does not have the template shape.
pub fn import_batch(text: &str) -> CoreResult<TemplateBatch> {
    let batch: TemplateBatch = parse_json(text, "template payload")?;
    tracing::debug!(
        goals = batch.goals.len(),
        tasks = batch.tasks.len(),
        care_plans = batch.care_plans.len(),
        version = batch.version.as_deref().unwrap_or("<none>"),
        "parsed template payload"
    );
    Ok(batch)
}

/// Render a single template (or record) as indented JSON.
pub fn export_template<T: Serialize>(template: &T) -> CoreResult<String> {
    serde_json::to_string_pretty(template).map_err(CoreError::Serialization)
}

/// Parse a single template (or record) from JSON.
///
/// # Errors
///
/// Returns [`CoreError::Parse`] on malformed text.
pub fn import_template<T: DeserializeOwned>(text: &str) -> CoreResult<T> {
    parse_json(text, "template")
}

/// Render one record as indented FHIR JSON.
pub fn export_record<R: Resource>(record: &R) -> CoreResult<String> {
    Ok(record.render()?)
}

/// Parse one record, checking its `resourceType`.
///
/// # Errors
///
/// Returns [`CoreError::Fhir`] on malformed text or a different `resourceType`.
pub fn import_record<R: Resource>(text: &str) -> CoreResult<R> {
    R::parse(text).map_err(|err| {
        tracing::warn!(resource_type = %R::RESOURCE_TYPE, "record import failed: {err}");
        CoreError::from(err)
    })
}

/// Package an exported payload with its file name and MIME type.
pub fn export_file(prefix: &str, date: NaiveDate, contents: String) -> ExportFile {
    ExportFile {
        file_name: export_file_name(prefix, date),
        mime_type: EXPORT_MIME_TYPE,
        contents,
    }
}

/// Suggested file name for an export made on `date`: `<prefix>-YYYY-MM-DD.json`.
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!(
        "{prefix}-{}.{EXPORT_FILE_EXTENSION}",
        date.format("%Y-%m-%d")
    )
}

/// Write an exported payload to `path`.
pub fn write_batch_file(path: &Path, payload: &str) -> CoreResult<()> {
    std::fs::write(path, payload).map_err(CoreError::FileWrite)
}

/// Read and parse an interchange file.
pub fn read_batch_file(path: &Path) -> CoreResult<TemplateBatch> {
    let text = std::fs::read_to_string(path).map_err(CoreError::FileRead)?;
    import_batch(&text)
}
