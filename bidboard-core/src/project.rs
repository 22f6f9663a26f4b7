//! Project records from the project-management subsystem.

use serde::{Deserialize, Serialize};

/// A project as provided by the upstream project feed.
///
/// Read-only to the calendar engine: milestones are derived from these
/// records but the records themselves are never written back. Date fields
/// are loosely formatted strings and go through `dates::normalize` /
/// `dates::try_normalize` before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_bid_conference_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfi_due_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_record() {
        let json = r#"{"id":"p1","name":"Acme HQ","bidDueDate":"2025-06-01"}"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Acme HQ");
        assert_eq!(record.bid_due_date.as_deref(), Some("2025-06-01"));
        assert!(record.start_date.is_none());
    }
}
