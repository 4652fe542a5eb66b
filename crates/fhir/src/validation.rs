//! Minimal required-field validation for records.
//!
//! Each validator checks every rule independently and collects all violations in a fixed order.
//! Failures are returned as data; whether an invalid record may be saved is the caller's
//! decision. Validation is never run implicitly by the store.

use crate::care_plan::CarePlan;
use crate::codes::Code;
use crate::datatypes::Reference;
use crate::goal::Goal;
use crate::task::Task;

/// Outcome of validating one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Records that can check their own required fields.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

impl Validate for Goal {
    fn validate(&self) -> ValidationResult {
        validate_goal(self)
    }
}

impl Validate for Task {
    fn validate(&self) -> ValidationResult {
        validate_task(self)
    }
}

impl Validate for CarePlan {
    fn validate(&self) -> ValidationResult {
        validate_care_plan(self)
    }
}

fn has_subject_reference(subject: Option<&Reference>) -> bool {
    subject.and_then(Reference::reference).is_some()
}

/// Required code: absent is "<label> is required", an unrecognised code names the code.
fn check_code<C: Code>(errors: &mut Vec<String>, label: &str, value: Option<&C>) {
    match value {
        None => errors.push(format!("{label} is required")),
        Some(code) if !code.is_known() => errors.push(format!(
            "{label} '{}' is not a recognised code",
            code.as_str()
        )),
        Some(_) => {}
    }
}

/// Goal: lifecycle status, description text, subject reference.
pub fn validate_goal(goal: &Goal) -> ValidationResult {
    let mut errors = Vec::new();

    check_code(&mut errors, "Lifecycle status", goal.lifecycle_status.as_ref());
    if goal.description.text().is_none() {
        errors.push("Description text is required".to_string());
    }
    if !has_subject_reference(goal.subject.as_ref()) {
        errors.push("Subject reference is required".to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Task: status, intent.
pub fn validate_task(task: &Task) -> ValidationResult {
    let mut errors = Vec::new();

    check_code(&mut errors, "Status", task.status.as_ref());
    check_code(&mut errors, "Intent", task.intent.as_ref());

    ValidationResult::from_errors(errors)
}

/// CarePlan: status, intent, subject reference.
pub fn validate_care_plan(plan: &CarePlan) -> ValidationResult {
    let mut errors = Vec::new();

    check_code(&mut errors, "Status", plan.status.as_ref());
    check_code(&mut errors, "Intent", plan.intent.as_ref());
    if !has_subject_reference(plan.subject.as_ref()) {
        errors.push("Subject reference is required".to_string());
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{create_codeable_concept_from_text, create_reference};
    use crate::care_plan::{CarePlanIntent, CarePlanStatus};
    use crate::goal::GoalLifecycleStatus;
    use crate::task::{TaskIntent, TaskStatus};

    #[test]
    fn empty_goal_reports_three_errors_in_order() {
        let result = validate_goal(&Goal::default());

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Lifecycle status is required",
                "Description text is required",
                "Subject reference is required",
            ]
        );
    }

    #[test]
    fn complete_goal_is_valid() {
        let goal = Goal {
            lifecycle_status: Some(GoalLifecycleStatus::Active),
            description: create_codeable_concept_from_text("Improve mobility", None, None),
            subject: Some(create_reference("Patient", "p1", None)),
            ..Goal::default()
        };

        let result = goal.validate();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn whitespace_description_counts_as_missing() {
        let goal = Goal {
            lifecycle_status: Some(GoalLifecycleStatus::Proposed),
            description: create_codeable_concept_from_text("   ", None, None),
            subject: Some(create_reference("Patient", "p1", None)),
            ..Goal::default()
        };

        assert_eq!(
            validate_goal(&goal).errors,
            vec!["Description text is required"]
        );
    }

    #[test]
    fn subject_without_literal_reference_is_missing() {
        let goal = Goal {
            lifecycle_status: Some(GoalLifecycleStatus::Proposed),
            description: create_codeable_concept_from_text("Walk", None, None),
            subject: Some(Reference {
                display: Some("Jane".into()),
                ..Reference::default()
            }),
            ..Goal::default()
        };

        assert_eq!(
            validate_goal(&goal).errors,
            vec!["Subject reference is required"]
        );
    }

    #[test]
    fn task_requires_status_and_intent() {
        assert_eq!(
            validate_task(&Task::default()).errors,
            vec!["Status is required", "Intent is required"]
        );

        let task = Task {
            status: Some(TaskStatus::Draft),
            ..Task::default()
        };
        assert_eq!(validate_task(&task).errors, vec!["Intent is required"]);

        let task = Task {
            status: Some(TaskStatus::Ready),
            intent: Some(TaskIntent::Order),
            ..Task::default()
        };
        assert!(task.validate().is_valid);
    }

    #[test]
    fn care_plan_requires_status_intent_and_subject() {
        assert_eq!(
            validate_care_plan(&CarePlan::default()).errors,
            vec![
                "Status is required",
                "Intent is required",
                "Subject reference is required",
            ]
        );

        let plan = CarePlan {
            status: Some(CarePlanStatus::Active),
            intent: Some(CarePlanIntent::Plan),
            subject: Some(create_reference("Patient", "p1", None)),
            ..CarePlan::default()
        };
        assert!(plan.validate().is_valid);
    }

    #[test]
    fn unrecognised_codes_are_reported_in_place() {
        let task = Task {
            status: Some(TaskStatus::Other("bogus".into())),
            ..Task::default()
        };
        assert_eq!(
            validate_task(&task).errors,
            vec!["Status 'bogus' is not a recognised code", "Intent is required"]
        );

        let plan = CarePlan {
            status: Some(CarePlanStatus::Active),
            intent: Some(CarePlanIntent::Other("wish".into())),
            subject: Some(create_reference("Patient", "p1", None)),
            ..CarePlan::default()
        };
        assert_eq!(
            validate_care_plan(&plan).errors,
            vec!["Intent 'wish' is not a recognised code"]
        );
    }
}
