use serde_json::Value;

use super::record::{type_name, RecordChecker};
use crate::models::{DocumentType, ResponseStatus, ValidationOptions};
use crate::report::{Issue, IssueKind};

const LABEL: &str = DocumentType::Responses.record_label();

/// Validates supplier responses; `requirement_id_external` may repeat across records
pub fn validate_responses(records: &[Value], options: &ValidationOptions) -> Vec<Issue> {
    let doc_type = DocumentType::Responses;
    let mut issues = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let Some(map) = record.as_object() else {
            issues.push(Issue::error(
                IssueKind::NotAnObject,
                Some(idx),
                format!("{} at index {} must be an object", LABEL, idx),
            ));
            continue;
        };

        let mut checker = RecordChecker::new(LABEL, idx, map);
        checker.check_unknown_fields(doc_type.allowed_fields(), options);
        checker.check_required(doc_type.required_fields());

        checker.string("requirement_id_external");
        for field in ["response_text", "ai_comment", "manual_comment", "question"] {
            checker.nullable_string(field);
        }
        checker.score("ai_score");
        checker.score("manual_score");
        check_status(&mut checker);
        checker.boolean("is_checked");

        issues.extend(checker.finish());
    }

    issues
}

fn check_status(checker: &mut RecordChecker<'_>) {
    let Some(status) = checker.get("status") else {
        return;
    };
    match status {
        Value::Null => {}
        Value::String(s) => {
            if s.parse::<ResponseStatus>().is_err() {
                let valid: Vec<String> =
                    ResponseStatus::ALL.iter().map(|s| s.to_string()).collect();
                let detail = format!("status must be one of {:?} (got '{}')", valid, s);
                checker.fail(IssueKind::InvalidValue, detail);
            }
        }
        other => {
            let detail = format!("status must be a string (got {})", type_name(other));
            checker.fail(IssueKind::InvalidType, detail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strict(records: Value) -> Vec<Issue> {
        validate_responses(records.as_array().unwrap(), &ValidationOptions::strict())
    }

    fn scored(field: &str, score: Value) -> Value {
        json!({ "requirement_id_external": "R1", field: score })
    }

    #[test]
    fn test_complete_response_is_valid() {
        let records = json!([
            {
                "requirement_id_external": "R1",
                "response_text": "Supported out of the box",
                "ai_score": 4.5,
                "ai_comment": "Meets the requirement",
                "manual_score": 4,
                "manual_comment": null,
                "question": "Is SSO included in the base licence?",
                "status": "pass",
                "is_checked": true
            },
            {"requirement_id_external": "R1", "status": null, "ai_score": null}
        ]);
        assert!(strict(records).is_empty());
    }

    #[test]
    fn test_every_half_step_score_passes() {
        let records: Vec<Value> = (0..=10)
            .map(|step| scored("manual_score", json!(step as f64 / 2.0)))
            .collect();
        assert!(strict(Value::Array(records)).is_empty());
    }

    #[test]
    fn test_score_increment_and_range() {
        let issues = strict(json!([
            scored("ai_score", json!(2.3)),
            scored("ai_score", json!(5.5)),
            scored("manual_score", json!(-0.5)),
            scored("manual_score", json!("3")),
        ]));
        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0].kind, IssueKind::InvalidIncrement);
        assert_eq!(
            issues[0].message,
            "Response at index 0: ai_score must be in 0.5 increments (got 2.3)"
        );
        assert_eq!(issues[1].kind, IssueKind::OutOfRange);
        assert_eq!(
            issues[1].message,
            "Response at index 1: ai_score must be between 0 and 5 (got 5.5)"
        );
        assert_eq!(issues[2].kind, IssueKind::OutOfRange);
        assert_eq!(issues[3].kind, IssueKind::InvalidType);
        assert_eq!(
            issues[3].message,
            "Response at index 3: manual_score must be a number"
        );
    }

    #[test]
    fn test_status_enumeration() {
        let issues = strict(json!([
            {"requirement_id_external": "R1", "status": "approved"},
            {"requirement_id_external": "R1", "status": 1},
        ]));
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].message,
            "Response at index 0: status must be one of [\"pending\", \"pass\", \"partial\", \"fail\"] (got 'approved')"
        );
        assert_eq!(
            issues[1].message,
            "Response at index 1: status must be a string (got number)"
        );
    }

    #[test]
    fn test_missing_requirement_reference_and_unknown_field() {
        let issues = strict(json!([{"response_text": "n/a", "supplier": "Acme"}]));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].kind, IssueKind::UnknownFields);
        assert!(issues[0].message.contains("[\"supplier\"]"));
        assert_eq!(
            issues[1].message,
            "Response at index 0 missing required field: requirement_id_external"
        );
    }

    #[test]
    fn test_is_checked_must_be_boolean() {
        let issues = strict(json!([{"requirement_id_external": "R1", "is_checked": "true"}]));
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Response at index 0: is_checked must be a boolean"
        );
    }
}
