//! In-memory template store.
//!
//! The store owns three ordered collections (Goal, Task and CarePlan templates). Insertion order
//! is preserved and is the display order. All mutations go through the operations below; there
//! is exactly one writer (the owner of the `&mut TemplateStore`).
//!
//! ## Operations
//!
//! - **add**: assigns a fresh id, sets `createdAt == updatedAt == now`, appends. Never
//!   validates; drafts may be incomplete.
//! - **update**: replaces the element with the same id in place, keeping its id and
//!   `createdAt` and stamping a strictly later `updatedAt`. A missing id is a no-op.
//! - **delete**: removes the element with the id. No cascade: CarePlans that referenced a
//!   deleted Goal/Task keep the id as a dangling soft reference.
//! - **bulk_load**: replaces all three collections wholesale without validating or
//!   re-stamping.
//!
//! After every change to the Goal or Task collections, and after every CarePlan add/update, the
//! affected CarePlan projections are recomputed (see [`crate::projection`]).

use crate::config::CoreConfig;
use crate::projection::apply_care_plan_projection;
use crate::templates::{
    next_timestamp, CarePlanDraft, CarePlanTemplate, GoalDraft, GoalTemplate, TaskDraft,
    TaskTemplate, Template,
};
use crate::transfer::{
    export_batch_versioned, export_file, export_file_name, import_batch, ExportFile,
};
use crate::CoreResult;
use chrono::NaiveDate;
use fhir::{generate_id, generate_identifier_with_system, Identifier};
use std::sync::Arc;

// ============================================================================
// Collection
// ============================================================================

/// One ordered collection of templates keyed by id.
#[derive(Clone, Debug)]
pub(crate) struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Template> Collection<T> {
    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// All templates in insertion order.
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn add(&mut self, draft: T::Draft) -> &mut T {
        let id = generate_id();
        // Ids are a timestamp plus a random UUID; a clash means id generation is broken.
        debug_assert!(self.position(&id).is_none(), "duplicate template id {id}");

        let template = T::from_draft(draft, id, next_timestamp(None));
        tracing::debug!(kind = %T::KIND, id = template.id(), "added template");

        self.items.push(template);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    fn update(&mut self, mut template: T) -> Option<&mut T> {
        let Some(index) = self.position(template.id()) else {
            tracing::warn!(kind = %T::KIND, id = template.id(), "update ignored: template not found");
            return None;
        };

        let existing = &self.items[index];
        let created_at = existing.created_at();
        let updated_at = next_timestamp(Some(existing.updated_at()));

        template.stamp_update(created_at, updated_at);
        tracing::debug!(kind = %T::KIND, id = template.id(), "updated template");

        self.items[index] = template;
        Some(&mut self.items[index])
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::debug!(kind = %T::KIND, id, "deleted template");
        }
        removed
    }

    fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }
}

// ============================================================================
// Store
// ============================================================================

/// The editor's template state.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    cfg: Arc<CoreConfig>,
    goals: Collection<GoalTemplate>,
    tasks: Collection<TaskTemplate>,
    care_plans: Collection<CarePlanTemplate>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new(Arc::new(CoreConfig::default()))
    }
}

impl TemplateStore {
    /// Creates an empty store.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            goals: Collection::default(),
            tasks: Collection::default(),
            care_plans: Collection::default(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn goals(&self) -> &[GoalTemplate] {
        self.goals.as_slice()
    }

    pub fn tasks(&self) -> &[TaskTemplate] {
        self.tasks.as_slice()
    }

    pub fn care_plans(&self) -> &[CarePlanTemplate] {
        self.care_plans.as_slice()
    }

    /// Build a `usual` record identifier under the configured identifier system.
    pub fn generate_identifier(&self, value: Option<&str>) -> Identifier {
        generate_identifier_with_system(self.cfg.identifier_system(), value)
    }

    // ------------------------------------------------------------------------
    // Goals
    // ------------------------------------------------------------------------

    pub fn add_goal(&mut self, draft: GoalDraft) -> GoalTemplate {
        let added = self.goals.add(draft).clone();
        self.refresh_all_projections();
        added
    }

    /// Returns `false` (and changes nothing) if no Goal template has this id.
    pub fn update_goal(&mut self, template: GoalTemplate) -> bool {
        let updated = self.goals.update(template).is_some();
        if updated {
            self.refresh_all_projections();
        }
        updated
    }

    pub fn delete_goal(&mut self, id: &str) -> bool {
        let removed = self.goals.delete(id);
        if removed {
            self.refresh_all_projections();
        }
        removed
    }

    pub fn get_goal(&self, id: &str) -> Option<&GoalTemplate> {
        self.goals.get(id)
    }

    // ------------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------------

    pub fn add_task(&mut self, draft: TaskDraft) -> TaskTemplate {
        let added = self.tasks.add(draft).clone();
        self.refresh_all_projections();
        added
    }

    /// Returns `false` (and changes nothing) if no Task template has this id.
    pub fn update_task(&mut self, template: TaskTemplate) -> bool {
        let updated = self.tasks.update(template).is_some();
        if updated {
            self.refresh_all_projections();
        }
        updated
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let removed = self.tasks.delete(id);
        if removed {
            self.refresh_all_projections();
        }
        removed
    }

    pub fn get_task(&self, id: &str) -> Option<&TaskTemplate> {
        self.tasks.get(id)
    }

    // ------------------------------------------------------------------------
    // Care plans
    // ------------------------------------------------------------------------

    pub fn add_care_plan(&mut self, draft: CarePlanDraft) -> CarePlanTemplate {
        let plan = self.care_plans.add(draft);
        apply_care_plan_projection(plan, self.goals.as_slice(), self.tasks.as_slice());
        plan.clone()
    }

    /// Returns `false` (and changes nothing) if no CarePlan template has this id.
    pub fn update_care_plan(&mut self, template: CarePlanTemplate) -> bool {
        match self.care_plans.update(template) {
            Some(plan) => {
                apply_care_plan_projection(plan, self.goals.as_slice(), self.tasks.as_slice());
                true
            }
            None => false,
        }
    }

    pub fn delete_care_plan(&mut self, id: &str) -> bool {
        self.care_plans.delete(id)
    }

    pub fn get_care_plan(&self, id: &str) -> Option<&CarePlanTemplate> {
        self.care_plans.get(id)
    }

    // ------------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------------

    /// Replace all three collections.
    ///
    /// Contents are taken as-is: no validation and no timestamp changes. CarePlan projections
    /// are recomputed against the new Goal and Task collections.
    pub fn bulk_load(
        &mut self,
        goals: Vec<GoalTemplate>,
        tasks: Vec<TaskTemplate>,
        care_plans: Vec<CarePlanTemplate>,
    ) {
        tracing::info!(
            goals = goals.len(),
            tasks = tasks.len(),
            care_plans = care_plans.len(),
            "bulk loading templates"
        );
        self.goals.replace_all(goals);
        self.tasks.replace_all(tasks);
        self.care_plans.replace_all(care_plans);
        self.refresh_all_projections();
    }

    /// Export every collection as an interchange payload.
    pub fn export_all(&self) -> CoreResult<String> {
        export_batch_versioned(
            self.goals(),
            self.tasks(),
            self.care_plans(),
            self.cfg.export_version(),
        )
    }

    /// Suggested file name for an export made on `date`, under the configured prefix.
    pub fn export_file_name(&self, date: NaiveDate) -> String {
        export_file_name(self.cfg.export_file_prefix(), date)
    }

    /// Export every collection, packaged with the dated file name and MIME type.
    pub fn export_file(&self, date: NaiveDate) -> CoreResult<ExportFile> {
        Ok(export_file(self.cfg.export_file_prefix(), date, self.export_all()?))
    }

    /// Import an interchange payload, replacing the store's contents.
    ///
    /// On failure the store is left unchanged and the error is returned.
    pub fn import_all(&mut self, text: &str) -> CoreResult<()> {
        let batch = import_batch(text)?;

        if let Some(version) = batch.version.as_deref() {
            if version != self.cfg.export_version() {
                tracing::warn!(
                    version,
                    expected = self.cfg.export_version(),
                    "importing templates exported with a different version"
                );
            }
        }

        self.bulk_load(batch.goals, batch.tasks, batch.care_plans);
        Ok(())
    }

    fn refresh_all_projections(&mut self) {
        let goals = self.goals.as_slice();
        let tasks = self.tasks.as_slice();
        for plan in self.care_plans.items.iter_mut() {
            apply_care_plan_projection(plan, goals, tasks);
        }
        tracing::debug!(
            care_plans = self.care_plans.len(),
            "recomputed care plan projections"
        );
    }
}
