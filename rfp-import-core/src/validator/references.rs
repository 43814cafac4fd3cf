//! Cross-document check of requirement `category_name` values.

use serde_json::Value;
use std::collections::BTreeSet;

use super::categories::validate_categories;
use crate::error::{Error, Result};
use crate::loader::records_of;
use crate::models::{DocumentType, ValidationOptions};
use crate::report::{Issue, IssueKind, ValidationReport};

/// Outcome of checking requirements against a categories document
#[derive(Debug, Default)]
pub struct CategoryCheck {
    /// Findings from validating the categories document on its own
    pub categories: ValidationReport,
    /// Unresolved `category_name` values; empty when the categories were invalid
    pub references: ValidationReport,
}

impl CategoryCheck {
    pub fn is_valid(&self) -> bool {
        self.categories.is_valid() && self.references.is_valid()
    }
}

/// Validates a categories document, then resolves the requirements' category names against it.
///
/// The categories may be a bare array or wrapped as `{"categories": [...]}`.
/// If they have errors of their own, references are not checked.
pub fn validate_with_categories(
    requirements: &[Value],
    categories_document: &Value,
    options: &ValidationOptions,
) -> Result<CategoryCheck> {
    let categories = records_of(categories_document, DocumentType::Categories)
        .ok_or(Error::CategoriesNotAList)?;

    let category_report = ValidationReport::new(validate_categories(categories, options));
    if !category_report.is_valid() {
        log::debug!("categories document invalid, skipping reference check");
        return Ok(CategoryCheck {
            categories: category_report,
            references: ValidationReport::default(),
        });
    }

    Ok(CategoryCheck {
        categories: category_report,
        references: ValidationReport::new(validate_category_references(requirements, categories)),
    })
}

/// Every trimmed, non-empty category `code` and `title`, as one lookup set
pub(crate) fn category_lookup(categories: &[Value]) -> BTreeSet<String> {
    categories
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|category| [category.get("code"), category.get("title")])
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks that each requirement's `category_name` names a category by code or title.
///
/// Both documents are expected to have passed their own validation already.
/// Records that are not objects are skipped, as are requirements whose
/// `category_name` is empty or not a string; requirements validation is what
/// reports a non-string name.
pub fn validate_category_references(requirements: &[Value], categories: &[Value]) -> Vec<Issue> {
    let lookup = category_lookup(categories);
    log::debug!(
        "checking {} requirement(s) against {} category name(s)",
        requirements.len(),
        lookup.len()
    );

    let mut issues = Vec::new();
    for (idx, requirement) in requirements.iter().enumerate() {
        let name = match requirement.get("category_name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.trim(),
            _ => continue,
        };
        if lookup.contains(name) {
            continue;
        }
        let valid: Vec<&str> = lookup.iter().map(String::as_str).collect();
        issues.push(Issue::error(
            IssueKind::UnknownCategory,
            Some(idx),
            format!(
                "Requirement at index {} references non-existent category '{}'. \
                 Valid categories: {:?}",
                idx, name, valid
            ),
        ));
    }
    issues
}
