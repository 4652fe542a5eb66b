//! # Care Core
//!
//! Template store for the care-plan editor.
//!
//! This crate holds the editor's state and the operations on it:
//! - Goal, Task and CarePlan templates wrapping FHIR records ([`templates`])
//! - The in-memory store with add/update/delete/get per collection ([`store`])
//! - CarePlan projection of referenced Goals and Tasks ([`projection`])
//! - JSON export/import of the whole store ([`transfer`])
//! - Search, dashboard counts and reference checks ([`search`])
//!
//! Record types, builders and required-field validation live in the `fhir` crate.
//! **No UI concerns**: rendering, forms and file pickers belong to the host application, which
//! also installs the `tracing` subscriber.

pub mod config;
pub mod constants;
pub mod error;
pub mod projection;
pub mod search;
pub mod store;
pub mod templates;
pub mod transfer;
pub mod validation;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use search::{DanglingReference, SearchResults, StoreSummary};
pub use store::TemplateStore;
pub use templates::{
    CarePlanDraft, CarePlanTemplate, GoalDraft, GoalTemplate, TaskDraft, TaskTemplate, Template,
};
pub use transfer::{ExportFile, TemplateBatch};

pub use fhir::{ResourceType, Validate, ValidationResult};
