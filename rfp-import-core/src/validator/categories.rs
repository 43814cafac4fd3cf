//! Category list validation.
//!
//! Runs in two passes. The first checks every record's shape and collects the
//! declared ids; the second resolves `parent_id` values against those ids.

use serde_json::Value;
use std::collections::BTreeSet;

use super::record::{type_name, RecordChecker, UniqueTracker};
use crate::models::{DocumentType, ValidationOptions, SHORT_NAME_MAX_CHARS};
use crate::report::{Issue, IssueKind};

const LABEL: &str = DocumentType::Categories.record_label();

/// Ids declared by well-typed category records, collected in the first pass
#[derive(Debug, Default)]
pub(crate) struct CategoryIndex {
    ids: BTreeSet<String>,
}

impl CategoryIndex {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

pub fn validate_categories(records: &[Value], options: &ValidationOptions) -> Vec<Issue> {
    let (mut issues, index) = check_shapes(records, options);
    log::debug!(
        "categories: first pass found {} issue(s), {} distinct id(s)",
        issues.len(),
        index.ids.len()
    );
    issues.extend(resolve_parents(records, &index));
    issues
}

fn check_shapes(records: &[Value], options: &ValidationOptions) -> (Vec<Issue>, CategoryIndex) {
    let doc_type = DocumentType::Categories;
    let mut issues = Vec::new();
    let mut index = CategoryIndex::default();
    let mut codes = UniqueTracker::new("code");
    let mut ids = UniqueTracker::new("id");

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

        if let Some(id) = checker.string("id") {
            index.ids.insert(id.to_string());
        }
        checker.string("code");
        checker.string("title");
        checker.bounded_text("short_name", SHORT_NAME_MAX_CHARS);
        checker.positive_integer("level");
        checker.number("order");

        if let Some(parent) = checker.get("parent_id") {
            if !parent.is_null() && !parent.is_string() {
                let detail = format!(
                    "parent_id must be a string or null (got {})",
                    type_name(parent)
                );
                checker.fail(IssueKind::InvalidType, detail);
            }
        }

        issues.extend(checker.finish());

        if let Some(code) = map.get("code") {
            issues.extend(codes.observe(idx, code));
        }
        if let Some(id) = map.get("id") {
            issues.extend(ids.observe(idx, id));
        }
    }

    (issues, index)
}

fn resolve_parents(records: &[Value], index: &CategoryIndex) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let Some(parent_id) = record.get("parent_id").and_then(Value::as_str) else {
            continue;
        };
        if index.contains(parent_id) {
            continue;
        }
        let valid: Vec<&str> = index.ids.iter().map(String::as_str).collect();
        issues.push(Issue::error(
            IssueKind::DanglingReference,
            Some(idx),
            format!(
                "{} at index {}: parent_id '{}' does not reference an existing category id. \
                 Valid ids: {:?}",
                LABEL, idx, parent_id, valid
            ),
        ));
    }

    issues
}
