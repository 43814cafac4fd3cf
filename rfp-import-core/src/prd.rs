//! Validation of PRD task-tracking documents
//!
//! A PRD document describes a feature as a list of user stories, each broken
//! down into tasks that an implementer ticks off. Structural gaps are errors;
//! questionable but usable content (unknown reference sections, odd
//! priorities, empty task lists) is reported as warnings.

use serde_json::{Map, Value};

use crate::report::{Issue, IssueKind, ValidationReport};
use crate::validator::type_name;

pub const ROOT_FIELDS: &[&str] = &["feature", "title", "description", "user_stories"];
pub const STORY_FIELDS: &[&str] = &["id", "title", "priority", "completed", "description", "tasks"];
pub const TASK_FIELDS: &[&str] = &["id", "description", "prompt", "completed"];
pub const REFERENCE_FIELDS: &[&str] = &[
    "specs",
    "architecture",
    "tests",
    "interface",
    "api",
    "database",
    "notes",
];
pub const PRIORITIES: &[&str] = &["P1", "P2", "P3"];

/// Checks a parsed PRD document and reports every finding at once
pub fn validate_prd(document: &Value) -> ValidationReport {
    let mut issues = Vec::new();

    let Some(root) = document.as_object() else {
        issues.push(Issue::error(
            IssueKind::NotAnObject,
            None,
            format!("PRD document must be an object (got {})", type_name(document)),
        ));
        return ValidationReport::new(issues);
    };

    for field in ROOT_FIELDS {
        if !root.contains_key(*field) {
            issues.push(Issue::error(
                IssueKind::MissingField,
                None,
                format!("Missing required root field: {}", field),
            ));
        }
    }

    if let Some(Value::Object(reference)) = root.get("reference_document") {
        check_reference_document(reference, &mut issues);
    }

    match root.get("user_stories") {
        None => {}
        Some(Value::Array(stories)) if stories.is_empty() => {
            issues.push(Issue::warning(
                IssueKind::InvalidValue,
                None,
                "No user stories found",
            ));
        }
        Some(Value::Array(stories)) => {
            for (idx, story) in stories.iter().enumerate() {
                check_story(idx, story, &mut issues);
            }
        }
        Some(other) => issues.push(Issue::error(
            IssueKind::InvalidType,
            None,
            format!("'user_stories' must be an array (got {})", type_name(other)),
        )),
    }

    ValidationReport::new(issues)
}

fn check_reference_document(reference: &Map<String, Value>, issues: &mut Vec<Issue>) {
    for (field, value) in reference {
        if !REFERENCE_FIELDS.contains(&field.as_str()) {
            issues.push(Issue::warning(
                IssueKind::UnknownFields,
                None,
                format!("Unknown reference_document field: {}", field),
            ));
        } else if field != "notes" && !value.is_array() {
            issues.push(Issue::warning(
                IssueKind::InvalidType,
                None,
                format!("reference_document.{} should be an array", field),
            ));
        }
    }
}

fn check_story(idx: usize, story: &Value, issues: &mut Vec<Issue>) {
    // Stories are numbered from 1 in PRD documents
    let label = format!("US-{}", idx + 1);

    let Some(story) = story.as_object() else {
        issues.push(Issue::error(
            IssueKind::NotAnObject,
            Some(idx),
            format!("{} must be an object", label),
        ));
        return;
    };

    for field in STORY_FIELDS {
        if !story.contains_key(*field) {
            issues.push(Issue::error(
                IssueKind::MissingField,
                Some(idx),
                format!("{} missing field: {}", label, field),
            ));
        }
    }

    if let Some(priority) = story.get("priority") {
        if !priority.as_str().is_some_and(|p| PRIORITIES.contains(&p)) {
            issues.push(Issue::warning(
                IssueKind::InvalidValue,
                Some(idx),
                format!(
                    "{} invalid priority: {} (should be P1, P2, or P3)",
                    label, priority
                ),
            ));
        }
    }

    match story.get("tasks") {
        None => {}
        Some(Value::Array(tasks)) if tasks.is_empty() => {
            issues.push(Issue::warning(
                IssueKind::InvalidValue,
                Some(idx),
                format!("{} has no tasks", label),
            ));
        }
        Some(Value::Array(tasks)) => {
            for (task_idx, task) in tasks.iter().enumerate() {
                check_task(idx, &label, task_idx + 1, task, issues);
            }
        }
        Some(_) => issues.push(Issue::error(
            IssueKind::InvalidType,
            Some(idx),
            format!("{} 'tasks' must be an array", label),
        )),
    }
}

fn check_task(idx: usize, story: &str, number: usize, task: &Value, issues: &mut Vec<Issue>) {
    let Some(task) = task.as_object() else {
        issues.push(Issue::error(
            IssueKind::NotAnObject,
            Some(idx),
            format!("{} Task {} must be an object", story, number),
        ));
        return;
    };

    for field in TASK_FIELDS {
        if !task.contains_key(*field) {
            issues.push(Issue::error(
                IssueKind::MissingField,
                Some(idx),
                format!("{} Task {} missing field: {}", story, number, field),
            ));
        }
    }

    for field in ["objective", "comments"] {
        if task.get(field).is_some_and(|v| !v.is_string()) {
            issues.push(Issue::warning(
                IssueKind::InvalidType,
                Some(idx),
                format!("{} Task {} '{}' should be string", story, number, field),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "feature": "003-financial-grid",
            "title": "Financial grid",
            "description": "Editable grid of supplier prices",
            "reference_document": {
                "specs": ["specs/003/spec.md"],
                "notes": "Pricing columns come from the RFP template"
            },
            "user_stories": [{
                "id": "US-1",
                "title": "View prices",
                "priority": "P1",
                "completed": false,
                "description": "As an evaluator I can see all prices",
                "tasks": [{
                    "id": "US-1-001",
                    "description": "Render the grid",
                    "prompt": "Build the grid component",
                    "completed": false,
                    "objective": "Read-only grid",
                    "comments": ""
                }]
            }]
        })
    }

    #[test]
    fn test_valid_prd() {
        let report = validate_prd(&sample());
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn test_missing_root_fields_accumulate() {
        let report = validate_prd(&json!({"feature": "x"}));
        assert_eq!(
            report.error_messages(),
            vec![
                "Missing required root field: title",
                "Missing required root field: description",
                "Missing required root field: user_stories",
            ]
        );
    }

    #[test]
    fn test_story_and_task_problems() {
        let mut document = sample();
        document["user_stories"][0]["priority"] = json!("P4");
        document["user_stories"][0]["tasks"][0]
            .as_object_mut()
            .unwrap()
            .remove("prompt");
        document["user_stories"][0]["tasks"][0]["comments"] = json!(3);

        let report = validate_prd(&document);
        assert!(!report.is_valid());
        assert_eq!(
            report.error_messages(),
            vec!["US-1 Task 1 missing field: prompt"]
        );
        let warnings: Vec<&str> = report.warnings().map(|w| w.message.as_str()).collect();
        assert_eq!(
            warnings,
            vec![
                "US-1 invalid priority: \"P4\" (should be P1, P2, or P3)",
                "US-1 Task 1 'comments' should be string",
            ]
        );
    }

    #[test]
    fn test_reference_document_warnings() {
        let mut document = sample();
        document["reference_document"] = json!({"specs": "spec.md", "wiki": []});
        let report = validate_prd(&document);
        assert!(report.is_valid());
        let warnings: Vec<&str> = report.warnings().map(|w| w.message.as_str()).collect();
        assert_eq!(
            warnings,
            vec![
                "reference_document.specs should be an array",
                "Unknown reference_document field: wiki",
            ]
        );
    }

    #[test]
    fn test_empty_stories_is_warning() {
        let mut document = sample();
        document["user_stories"] = json!([]);
        let report = validate_prd(&document);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_non_array_stories_and_tasks() {
        let mut document = sample();
        document["user_stories"][0]["tasks"] = json!({});
        let report = validate_prd(&document);
        assert_eq!(report.error_messages(), vec!["US-1 'tasks' must be an array"]);

        document["user_stories"] = json!("none");
        let report = validate_prd(&document);
        assert_eq!(
            report.error_messages(),
            vec!["'user_stories' must be an array (got string)"]
        );
    }

    #[test]
    fn test_root_must_be_object() {
        let report = validate_prd(&json!([]));
        assert_eq!(
            report.error_messages(),
            vec!["PRD document must be an object (got array)"]
        );
    }
}
