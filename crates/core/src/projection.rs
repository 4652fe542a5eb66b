//! CarePlan projection.
//!
//! A CarePlan template's `referencedGoals` / `referencedTasks` are the source of truth; the
//! record's `goal` list and its reference-bearing `activity` entries are derived from them by
//! joining against the currently loaded Goal and Task templates.
//!
//! Resolution rules for each referenced id:
//! - found: reference the target's record id (falling back to the template id when the record
//!   has none) and display the target template's name;
//! - not found: reference the raw id, no display.
//!
//! Activities without a `reference` (inline `detail` activities) are not derived and are kept,
//! after the derived entries. Everything here is pure; the store decides when to apply it.

use crate::templates::{CarePlanTemplate, GoalTemplate, TaskTemplate};
use fhir::{create_reference, CarePlanActivity, Reference, ResourceType};

/// The id a projected reference uses for a loaded template: its record's own id when set,
/// otherwise the template id.
pub(crate) fn reference_id<'a>(template_id: &'a str, record_id: Option<&'a str>) -> &'a str {
    record_id
        .map(str::trim)
        .filter(|rid| !rid.is_empty())
        .unwrap_or(template_id)
}

fn resolve<'a>(
    id: &'a str,
    target: Option<(Option<&'a str>, &'a str)>,
) -> (&'a str, Option<&'a str>) {
    match target {
        Some((record_id, name)) => {
            let display = Some(name.trim()).filter(|n| !n.is_empty());
            (reference_id(id, record_id), display)
        }
        None => (id, None),
    }
}

/// Derive `CarePlan.goal` from referenced GoalTemplate ids.
pub fn project_goal_references(referenced_goals: &[String], goals: &[GoalTemplate]) -> Vec<Reference> {
    referenced_goals
        .iter()
        .map(|id| {
            let target = goals
                .iter()
                .find(|g| g.id == *id)
                .map(|g| (g.record.id.as_deref(), g.name.as_str()));
            let (resolved_id, display) = resolve(id, target);
            create_reference(ResourceType::Goal.as_str(), resolved_id, display)
        })
        .collect()
}

/// Derive the reference-bearing `CarePlan.activity` entries from referenced TaskTemplate ids.
pub fn project_task_activities(
    referenced_tasks: &[String],
    tasks: &[TaskTemplate],
) -> Vec<CarePlanActivity> {
    referenced_tasks
        .iter()
        .map(|id| {
            let target = tasks
                .iter()
                .find(|t| t.id == *id)
                .map(|t| (t.record.id.as_deref(), t.name.as_str()));
            let (resolved_id, display) = resolve(id, target);
            CarePlanActivity::from_reference(create_reference(
                ResourceType::Task.as_str(),
                resolved_id,
                display,
            ))
        })
        .collect()
}

/// Recompute the derived lists of one CarePlan template in place.
///
/// Does not touch `updatedAt`: the projection is not an authored change.
pub fn apply_care_plan_projection(
    plan: &mut CarePlanTemplate,
    goals: &[GoalTemplate],
    tasks: &[TaskTemplate],
) {
    plan.record.goal = project_goal_references(&plan.referenced_goals, goals);

    let mut activity = project_task_activities(&plan.referenced_tasks, tasks);
    activity.extend(
        plan.record
            .activity
            .drain(..)
            .filter(|existing| existing.reference.is_none()),
    );
    plan.record.activity = activity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{CarePlanDraft, GoalDraft, TaskDraft, Template};
    use chrono::Utc;
    use fhir::{ActivityDetail, CarePlan, Goal, Task};
    use serde_json::json;

    fn goal(id: &str, name: &str, record_id: Option<&str>) -> GoalTemplate {
        GoalTemplate::from_draft(
            GoalDraft {
                name: name.into(),
                record: Goal {
                    id: record_id.map(str::to_owned),
                    ..Goal::default()
                },
                ..GoalDraft::default()
            },
            id.into(),
            Utc::now(),
        )
    }

    fn task(id: &str, name: &str) -> TaskTemplate {
        TaskTemplate::from_draft(
            TaskDraft {
                name: name.into(),
                record: Task::default(),
                ..TaskDraft::default()
            },
            id.into(),
            Utc::now(),
        )
    }

    fn plan(goals: &[&str], tasks: &[&str]) -> CarePlanTemplate {
        CarePlanTemplate::from_draft(
            CarePlanDraft {
                referenced_goals: goals.iter().map(|s| s.to_string()).collect(),
                referenced_tasks: tasks.iter().map(|s| s.to_string()).collect(),
                ..CarePlanDraft::default()
            },
            "cp1".into(),
            Utc::now(),
        )
    }

    #[test]
    fn resolved_goal_gets_name_as_display() {
        let goals = vec![goal("g1", "Improve mobility", None)];

        let refs = project_goal_references(&["g1".to_string()], &goals);
        assert_eq!(
            serde_json::to_value(&refs).expect("serialize"),
            json!([{"reference": "Goal/g1", "type": "Goal", "display": "Improve mobility"}])
        );
    }

    #[test]
    fn unresolved_goal_keeps_raw_id_without_display() {
        let refs = project_goal_references(&["g1".to_string()], &[]);
        assert_eq!(refs[0].reference(), Some("Goal/g1"));
        assert_eq!(refs[0].display, None);
    }

    #[test]
    fn record_id_is_preferred_over_template_id() {
        let goals = vec![goal("g1", "Improve mobility", Some("fhir-goal-9"))];
        let refs = project_goal_references(&["g1".to_string()], &goals);
        assert_eq!(refs[0].reference(), Some("Goal/fhir-goal-9"));
    }

    #[test]
    fn order_follows_referenced_ids() {
        let tasks = vec![task("t1", "Stretch"), task("t2", "Walk")];
        let activities =
            project_task_activities(&["t2".to_string(), "t9".to_string(), "t1".to_string()], &tasks);

        let references: Vec<_> = activities
            .iter()
            .map(|a| a.reference.as_ref().and_then(Reference::reference))
            .collect();
        assert_eq!(
            references,
            vec![Some("Task/t2"), Some("Task/t9"), Some("Task/t1")]
        );
        assert_eq!(
            activities[0].reference.as_ref().and_then(|r| r.display.as_deref()),
            Some("Walk")
        );
        assert_eq!(activities[1].reference.as_ref().and_then(|r| r.display.clone()), None);
    }

    #[test]
    fn empty_references_omit_derived_fields() {
        let mut plan = plan(&[], &[]);
        apply_care_plan_projection(&mut plan, &[], &[]);

        let value = serde_json::to_value(&plan.record).expect("serialize");
        assert!(value.get("goal").is_none());
        assert!(value.get("activity").is_none());
    }

    #[test]
    fn projection_replaces_stale_references_and_keeps_detail_activities() {
        let mut plan = plan(&["g1"], &["t1"]);
        plan.record = CarePlan {
            goal: vec![create_reference("Goal", "old", None)],
            activity: vec![
                CarePlanActivity::from_reference(create_reference("Task", "old", None)),
                CarePlanActivity {
                    detail: Some(ActivityDetail {
                        description: Some("Home visit".into()),
                        ..ActivityDetail::default()
                    }),
                    ..CarePlanActivity::default()
                },
            ],
            ..CarePlan::default()
        };
        let updated_at = plan.updated_at;

        apply_care_plan_projection(&mut plan, &[goal("g1", "Mobility", None)], &[task("t1", "Walk")]);

        assert_eq!(plan.record.goal.len(), 1);
        assert_eq!(plan.record.goal[0].reference(), Some("Goal/g1"));
        assert_eq!(plan.record.activity.len(), 2);
        assert_eq!(
            plan.record.activity[0]
                .reference
                .as_ref()
                .and_then(Reference::reference),
            Some("Task/t1")
        );
        assert!(plan.record.activity[1].detail.is_some());
        assert_eq!(plan.updated_at, updated_at);
    }
}
