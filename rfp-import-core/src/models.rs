use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const CATEGORY_FIELDS: &[&str] = &[
    "id",
    "code",
    "title",
    "level",
    "short_name",
    "parent_id",
    "order",
];
pub const CATEGORY_REQUIRED: &[&str] = &["id", "code", "title", "level", "short_name"];

pub const REQUIREMENT_FIELDS: &[&str] = &[
    "code",
    "title",
    "description",
    "weight",
    "category_name",
    "tags",
    "is_mandatory",
    "is_optional",
    "page_number",
    "rf_document_id",
];
pub const REQUIREMENT_REQUIRED: &[&str] =
    &["code", "title", "description", "weight", "category_name"];

pub const RESPONSE_FIELDS: &[&str] = &[
    "requirement_id_external",
    "response_text",
    "ai_score",
    "ai_comment",
    "manual_score",
    "manual_comment",
    "question",
    "status",
    "is_checked",
];
pub const RESPONSE_REQUIRED: &[&str] = &["requirement_id_external"];

/// Maximum length of a category short name, counted in characters after trimming
pub const SHORT_NAME_MAX_CHARS: usize = 50;
/// Maximum length of a requirement tag, counted in characters after trimming
pub const TAG_MAX_CHARS: usize = 100;

/// The kinds of import document that can be validated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Categories,
    Requirements,
    Responses,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Categories => write!(f, "categories"),
            DocumentType::Requirements => write!(f, "requirements"),
            DocumentType::Responses => write!(f, "responses"),
        }
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categories" => Ok(DocumentType::Categories),
            "requirements" => Ok(DocumentType::Requirements),
            "responses" => Ok(DocumentType::Responses),
            other => Err(Error::UnknownDocumentType(other.to_string())),
        }
    }
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Categories,
        DocumentType::Requirements,
        DocumentType::Responses,
    ];

    /// Capitalized label used when naming a single record ("Category at index 3")
    pub const fn record_label(&self) -> &'static str {
        match self {
            DocumentType::Categories => "Category",
            DocumentType::Requirements => "Requirement",
            DocumentType::Responses => "Response",
        }
    }

    /// Singular noun used in document-level messages
    pub fn noun(&self) -> &'static str {
        match self {
            DocumentType::Categories => "category",
            DocumentType::Requirements => "requirement",
            DocumentType::Responses => "response",
        }
    }

    /// Every field a record of this type may carry
    pub fn allowed_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::Categories => CATEGORY_FIELDS,
            DocumentType::Requirements => REQUIREMENT_FIELDS,
            DocumentType::Responses => RESPONSE_FIELDS,
        }
    }

    /// Fields that must be present on every record of this type
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::Categories => CATEGORY_REQUIRED,
            DocumentType::Requirements => REQUIREMENT_REQUIRED,
            DocumentType::Responses => RESPONSE_REQUIRED,
        }
    }

    /// Key under which a wrapped document stores its records
    pub fn envelope_key(&self) -> &'static str {
        match self {
            DocumentType::Categories => "categories",
            DocumentType::Requirements => "requirements",
            DocumentType::Responses => "responses",
        }
    }
}

/// Review status of a supplier response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Pending,
    Pass,
    Partial,
    Fail,
}

impl ResponseStatus {
    pub const ALL: [ResponseStatus; 4] = [
        ResponseStatus::Pending,
        ResponseStatus::Pass,
        ResponseStatus::Partial,
        ResponseStatus::Fail,
    ];
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Pending => write!(f, "pending"),
            ResponseStatus::Pass => write!(f, "pass"),
            ResponseStatus::Partial => write!(f, "partial"),
            ResponseStatus::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for ResponseStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseStatus::ALL
            .into_iter()
            .find(|status| status.to_string() == s)
            .ok_or(())
    }
}

/// Options that change how strictly records are checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Report unknown fields as warnings instead of errors
    pub allow_unknown_fields: bool,
}

impl ValidationOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            allow_unknown_fields: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parse() {
        assert_eq!(
            "categories".parse::<DocumentType>().unwrap(),
            DocumentType::Categories
        );
        assert_eq!(
            "responses".parse::<DocumentType>().unwrap(),
            DocumentType::Responses
        );
        assert!(matches!(
            "Requirements".parse::<DocumentType>(),
            Err(Error::UnknownDocumentType(_))
        ));
    }

    #[test]
    fn test_required_fields_are_allowed() {
        for doc_type in DocumentType::ALL {
            for field in doc_type.required_fields() {
                assert!(
                    doc_type.allowed_fields().contains(field),
                    "{} is required but not allowed for {}",
                    field,
                    doc_type
                );
            }
        }
    }

    #[test]
    fn test_response_status_parse() {
        assert_eq!("partial".parse::<ResponseStatus>(), Ok(ResponseStatus::Partial));
        assert_eq!("PASS".parse::<ResponseStatus>(), Err(()));
        assert_eq!(ResponseStatus::Fail.to_string(), "fail");
    }
}
