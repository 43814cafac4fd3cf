//! Schema validation for RFP import documents
//!
//! Each document type has its own record checker; [`validate`] dispatches on
//! the declared type and wraps the findings in a [`ValidationReport`].
//! Content problems never abort a run: every record is checked and every
//! finding is returned. Only a document that is not an array at all is a
//! hard failure.

mod categories;
mod record;
mod references;
mod requirements;
mod responses;

pub use categories::validate_categories;
pub(crate) use record::type_name;
pub use references::{validate_category_references, validate_with_categories, CategoryCheck};
pub use requirements::validate_requirements;
pub use responses::validate_responses;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{DocumentType, ValidationOptions};
use crate::report::ValidationReport;

/// Validates a parsed document of the given type
pub fn validate(
    document: &Value,
    document_type: DocumentType,
    options: &ValidationOptions,
) -> Result<ValidationReport> {
    let records = document.as_array().ok_or(Error::NotAList {
        noun: document_type.noun(),
    })?;

    let issues = match document_type {
        DocumentType::Categories => validate_categories(records, options),
        DocumentType::Requirements => validate_requirements(records, options),
        DocumentType::Responses => validate_responses(records, options),
    };
    log::debug!(
        "validated {} {} record(s): {} issue(s)",
        records.len(),
        document_type.noun(),
        issues.len()
    );

    Ok(ValidationReport::new(issues))
}
