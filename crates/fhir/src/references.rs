//! Reverse reference lookup.
//!
//! Used to check whether a Goal or Task is still in use before it is deleted. The lookup is
//! advisory: deleting a referenced record is allowed and leaves a dangling soft reference.

use crate::care_plan::CarePlan;
use crate::datatypes::Reference;
use crate::goal::Goal;
use crate::task::Task;
use crate::ResourceType;

/// A borrowed record of any supported resource type.
#[derive(Clone, Copy, Debug)]
pub enum ResourceRef<'a> {
    Goal(&'a Goal),
    Task(&'a Task),
    CarePlan(&'a CarePlan),
}

impl<'a> From<&'a Goal> for ResourceRef<'a> {
    fn from(goal: &'a Goal) -> Self {
        ResourceRef::Goal(goal)
    }
}

impl<'a> From<&'a Task> for ResourceRef<'a> {
    fn from(task: &'a Task) -> Self {
        ResourceRef::Task(task)
    }
}

impl<'a> From<&'a CarePlan> for ResourceRef<'a> {
    fn from(plan: &'a CarePlan) -> Self {
        ResourceRef::CarePlan(plan)
    }
}

/// Returns true if `record` is a CarePlan that references `<target_type>/<target_id>`.
///
/// Looked up in `goal[].reference`, `activity[].reference.reference` and
/// `activity[].detail.goal[].reference`. Any other record type never references anything.
pub fn references_resource<'a>(
    record: impl Into<ResourceRef<'a>>,
    target_type: ResourceType,
    target_id: &str,
) -> bool {
    let plan = match record.into() {
        ResourceRef::CarePlan(plan) => plan,
        ResourceRef::Goal(_) | ResourceRef::Task(_) => return false,
    };

    let target = format!("{target_type}/{target_id}");
    let matches = |r: &Reference| r.reference.as_deref() == Some(target.as_str());

    plan.goal.iter().any(matches)
        || plan.activity.iter().any(|activity| {
            activity.reference.as_ref().is_some_and(matches)
                || activity
                    .detail
                    .as_ref()
                    .is_some_and(|detail| detail.goal.iter().any(matches))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::create_reference;
    use crate::care_plan::{ActivityDetail, CarePlanActivity};

    fn plan_with_detail_goal(reference: &str) -> CarePlan {
        CarePlan {
            activity: vec![CarePlanActivity {
                detail: Some(ActivityDetail {
                    goal: vec![Reference {
                        reference: Some(reference.into()),
                        ..Reference::default()
                    }],
                    ..ActivityDetail::default()
                }),
                ..CarePlanActivity::default()
            }],
            ..CarePlan::default()
        }
    }

    #[test]
    fn finds_goal_inside_activity_detail() {
        let plan = plan_with_detail_goal("Goal/g1");

        assert!(references_resource(&plan, ResourceType::Goal, "g1"));
        assert!(!references_resource(&plan, ResourceType::Goal, "g2"));
    }

    #[test]
    fn finds_top_level_goal_and_activity_reference() {
        let plan = CarePlan {
            goal: vec![create_reference("Goal", "g1", Some("Improve mobility"))],
            activity: vec![CarePlanActivity::from_reference(create_reference(
                "Task", "t1", None,
            ))],
            ..CarePlan::default()
        };

        assert!(references_resource(&plan, ResourceType::Goal, "g1"));
        assert!(references_resource(&plan, ResourceType::Task, "t1"));
        assert!(!references_resource(&plan, ResourceType::Task, "g1"));
        assert!(!references_resource(&plan, ResourceType::Goal, "t1"));
    }

    #[test]
    fn non_care_plan_records_reference_nothing() {
        let goal = Goal {
            addresses: vec![create_reference("Goal", "g1", None)],
            ..Goal::default()
        };

        assert!(!references_resource(&goal, ResourceType::Goal, "g1"));
        assert!(!references_resource(&Task::default(), ResourceType::Goal, "g1"));
    }

    #[test]
    fn id_match_is_exact() {
        let plan = plan_with_detail_goal("Goal/g10");
        assert!(!references_resource(&plan, ResourceType::Goal, "g1"));
    }
}
