use serde_json::Value;

use super::record::{RecordChecker, UniqueTracker};
use crate::models::{DocumentType, ValidationOptions, TAG_MAX_CHARS};
use crate::report::{Issue, IssueKind};

const LABEL: &str = DocumentType::Requirements.record_label();

pub fn validate_requirements(records: &[Value], options: &ValidationOptions) -> Vec<Issue> {
    let doc_type = DocumentType::Requirements;
    let mut issues = Vec::new();
    let mut codes = UniqueTracker::new("code");

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

        for field in ["code", "title", "description", "category_name"] {
            checker.string(field);
        }
        checker.number_between("weight", 0.0, 1.0);
        checker.boolean("is_mandatory");
        checker.boolean("is_optional");
        checker.positive_integer("page_number");
        checker.tag_list("tags", TAG_MAX_CHARS);

        issues.extend(checker.finish());

        if let Some(code) = map.get("code") {
            issues.extend(codes.observe(idx, code));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strict(records: Value) -> Vec<Issue> {
        validate_requirements(records.as_array().unwrap(), &ValidationOptions::strict())
    }

    fn requirement(code: &str, weight: Value) -> Value {
        json!({
            "code": code,
            "title": "Single sign-on",
            "description": "The platform supports SAML 2.0 SSO",
            "weight": weight,
            "category_name": "Security",
        })
    }

    #[test]
    fn test_full_requirement_is_valid() {
        let records = json!([{
            "code": "R1",
            "title": "Audit log",
            "description": "All admin actions are logged",
            "weight": 0.25,
            "category_name": "SEC",
            "tags": ["audit", "compliance"],
            "is_mandatory": true,
            "is_optional": false,
            "page_number": 12,
            "rf_document_id": {"anything": ["goes", 1]}
        }]);
        assert!(strict(records).is_empty());
    }

    #[test]
    fn test_weight_bounds_inclusive() {
        let issues = strict(json!([
            requirement("R1", json!(0)),
            requirement("R2", json!(1)),
            requirement("R3", json!(1.0)),
            requirement("R4", json!(1.0001)),
            requirement("R5", json!(-0.1)),
        ]));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].index, Some(3));
        assert_eq!(issues[0].kind, IssueKind::OutOfRange);
        assert_eq!(
            issues[0].message,
            "Requirement at index 3: weight must be a number between 0 and 1 (got 1.0001)"
        );
        assert_eq!(issues[1].index, Some(4));
    }

    #[test]
    fn test_weight_must_be_number() {
        let issues = strict(json!([requirement("R1", json!("0.5"))]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::InvalidType);
        assert_eq!(
            issues[0].message,
            "Requirement at index 0: weight must be a number between 0 and 1 (got string)"
        );
    }

    #[test]
    fn test_duplicate_code_reported_at_second_occurrence() {
        let issues = strict(json!([
            requirement("R1", json!(0.5)),
            requirement("R1", json!(0.5)),
        ]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::Duplicate);
        assert_eq!(issues[0].index, Some(1));
        assert_eq!(issues[0].message, "Duplicate code 'R1' at index 1");
    }

    #[test]
    fn test_tags() {
        let mut record = requirement("R1", json!(0.5));
        record["tags"] = json!(["ok", "  ", 3, "t".repeat(101)]);
        let issues = strict(json!([record]));
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Requirement at index 0: tag at position 1 cannot be empty",
                "Requirement at index 0: tag at position 2 must be a string",
                "Requirement at index 0: tag at position 3 exceeds 100 characters (got 101)",
            ]
        );

        let mut record = requirement("R2", json!(0.5));
        record["tags"] = json!("audit");
        let issues = strict(json!([record]));
        assert_eq!(issues[0].message, "Requirement at index 0: tags must be an array");
    }

    #[test]
    fn test_booleans_and_page_number() {
        let mut record = requirement("R1", json!(0.5));
        record["is_mandatory"] = json!("yes");
        record["page_number"] = json!(0);
        let issues = strict(json!([record]));
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Requirement at index 0: is_mandatory must be a boolean",
                "Requirement at index 0: page_number must be a positive integer (got 0)",
            ]
        );
    }

    #[test]
    fn test_errors_accumulate_across_records() {
        let issues = strict(json!([
            42,
            {"code": "R2", "lot": "A"},
            requirement("R3", json!(2)),
        ]));
        let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::NotAnObject,
                IssueKind::UnknownFields,
                IssueKind::MissingField,
                IssueKind::MissingField,
                IssueKind::MissingField,
                IssueKind::MissingField,
                IssueKind::OutOfRange,
            ]
        );
        assert!(issues[1].message.contains("[\"lot\"]"));
    }
}
