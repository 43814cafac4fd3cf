use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Label used for requirements without a usable `category_name`
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Requirement counts, overall and per category
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RequirementSummary {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl RequirementSummary {
    pub fn from_records(records: &[Value]) -> Self {
        let mut by_category = BTreeMap::new();
        for record in records.iter().filter(|r| r.is_object()) {
            let category = record
                .get("category_name")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_CATEGORY);
            *by_category.entry(category.to_string()).or_insert(0) += 1;
        }

        Self {
            total: records.len(),
            by_category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
