use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable classification of a validation finding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NotAnObject,
    UnknownFields,
    MissingField,
    InvalidType,
    OutOfRange,
    InvalidIncrement,
    InvalidValue,
    Duplicate,
    DanglingReference,
    UnknownCategory,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueKind::NotAnObject => "not_an_object",
            IssueKind::UnknownFields => "unknown_fields",
            IssueKind::MissingField => "missing_field",
            IssueKind::InvalidType => "invalid_type",
            IssueKind::OutOfRange => "out_of_range",
            IssueKind::InvalidIncrement => "invalid_increment",
            IssueKind::InvalidValue => "invalid_value",
            IssueKind::Duplicate => "duplicate",
            IssueKind::DanglingReference => "dangling_reference",
            IssueKind::UnknownCategory => "unknown_category",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding produced while checking a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// Index of the offending record, when the finding belongs to one
    pub index: Option<usize>,
    pub message: String,
}

impl Issue {
    pub fn error(kind: IssueKind, index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            index,
            message: message.into(),
        }
    }

    pub fn warning(kind: IssueKind, index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            index,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Every finding from one validation run, in the order they were found
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// A document is valid when it produced no error-severity findings
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(Issue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    /// Error messages only, one per finding
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().map(|i| i.message.clone()).collect()
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }
}
