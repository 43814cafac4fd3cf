pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod prd;
pub mod report;
pub mod summary;
pub mod validator;

// Re-export commonly used types
pub use config::{get_config_path, ValidatorConfig};
pub use error::{Error, ErrorKind};
pub use loader::{load_document, records_of};
pub use models::{DocumentType, ResponseStatus, ValidationOptions};
pub use prd::validate_prd;
pub use report::{Issue, IssueKind, Severity, ValidationReport};
pub use summary::RequirementSummary;
pub use validator::{
    validate, validate_category_references, validate_with_categories, CategoryCheck,
};
