//! Read-only queries over the store: text search, dashboard counts and reference checks.

use crate::projection::reference_id;
use crate::store::TemplateStore;
use crate::templates::{CarePlanTemplate, GoalTemplate, TaskTemplate, Template};
use fhir::{references_resource, ResourceType};

/// Templates whose name or description matched a search query, in collection order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResults<'a> {
    pub goals: Vec<&'a GoalTemplate>,
    pub tasks: Vec<&'a TaskTemplate>,
    pub care_plans: Vec<&'a CarePlanTemplate>,
}

impl SearchResults<'_> {
    pub fn len(&self) -> usize {
        self.goals.len() + self.tasks.len() + self.care_plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dashboard counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub goals: usize,
    pub tasks: usize,
    pub care_plans: usize,
    pub dangling_references: usize,
}

/// A CarePlan soft reference whose target template is not loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    pub care_plan_id: String,
    pub kind: ResourceType,
    pub target_id: String,
}

fn matches<T: Template>(template: &T, needle: &str) -> bool {
    needle.is_empty()
        || template.name().to_lowercase().contains(needle)
        || template.description().to_lowercase().contains(needle)
}

fn filter<'a, T: Template>(items: &'a [T], needle: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, needle)).collect()
}

impl TemplateStore {
    /// Case-insensitive substring search over template names and descriptions.
    ///
    /// A blank query matches every template.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let needle = query.trim().to_lowercase();

        SearchResults {
            goals: filter(self.goals(), &needle),
            tasks: filter(self.tasks(), &needle),
            care_plans: filter(self.care_plans(), &needle),
        }
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            goals: self.goals().len(),
            tasks: self.tasks().len(),
            care_plans: self.care_plans().len(),
            dangling_references: self.dangling_references().len(),
        }
    }

    /// Every referenced Goal/Task id that no loaded template carries.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for plan in self.care_plans() {
            let goals = plan
                .referenced_goals
                .iter()
                .filter(|id| self.get_goal(id).is_none())
                .map(|id| (ResourceType::Goal, id));
            let tasks = plan
                .referenced_tasks
                .iter()
                .filter(|id| self.get_task(id).is_none())
                .map(|id| (ResourceType::Task, id));

            dangling.extend(goals.chain(tasks).map(|(kind, id)| DanglingReference {
                care_plan_id: plan.id.clone(),
                kind,
                target_id: id.clone(),
            }));
        }

        dangling
    }

    /// CarePlan templates whose record references the Goal or Task template `template_id`.
    ///
    /// The template id is resolved the way the projection resolves it, so a template whose
    /// record carries its own id is still found. Ids that are not loaded are matched as-is.
    pub fn care_plans_referencing(
        &self,
        resource_type: ResourceType,
        template_id: &str,
    ) -> Vec<&CarePlanTemplate> {
        let target = match resource_type {
            ResourceType::Goal => self
                .get_goal(template_id)
                .and_then(|goal| goal.record.id.as_deref()),
            ResourceType::Task => self
                .get_task(template_id)
                .and_then(|task| task.record.id.as_deref()),
            ResourceType::CarePlan => None,
        };
        let target = reference_id(template_id, target);

        self.care_plans()
            .iter()
            .filter(|plan| references_resource(&plan.record, resource_type, target))
            .collect()
    }
}
