use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::{null_as_default, Branch};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchData {
    #[serde(default, deserialize_with = "deserialize_branches")]
    pub branches: Vec<Branch>,
}

/// Parse each branch on its own so one bad record is skipped
/// instead of failing the whole directory.
fn deserialize_branches<'de, D>(deserializer: D) -> Result<Vec<Branch>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = null_as_default(deserializer)?;
    let total = raw.len();

    let branches: Vec<Branch> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let id = value
                .get("branchId")
                .and_then(|v| v.as_str())
                .unwrap_or("?")
                .to_string();
            match serde_json::from_value::<Branch>(value) {
                Ok(branch) => Some(branch),
                Err(e) => {
                    warn!(index, branch_id = %id, error = %e, "Skipping malformed branch");
                    None
                }
            }
        })
        .collect();

    if branches.len() < total {
        warn!(kept = branches.len(), total, "Some branches could not be read");
    }
    Ok(branches)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "totalCount", default, deserialize_with = "null_as_default")]
    pub total_count: usize,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// The whole directory payload as delivered: `{ data: { branches }, metadata }`.
///
/// Once loaded this is treated as an immutable snapshot; views borrow from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: BranchData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

impl BranchResponse {
    pub fn branches(&self) -> &[Branch] {
        &self.data.branches
    }

    /// Total count reported by the producer, falling back to the actual length
    pub fn total_count(&self) -> usize {
        if self.metadata.total_count > 0 {
            self.metadata.total_count
        } else {
            self.data.branches.len()
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.metadata
            .timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn contact_count(&self) -> usize {
        self.data.branches.iter().map(|b| b.branch_contacts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserialize() {
        let json = r#"{
            "data": { "branches": [
                { "branchId": "1", "branchType": "Lokalforening", "branchName": "Oslo Lokalforening" }
            ] },
            "metadata": { "totalCount": 1, "timestamp": "2024-03-01T12:00:00Z" }
        }"#;
        let response: BranchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.branches().len(), 1);
        assert_eq!(response.total_count(), 1);
        let ts = response.timestamp().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_missing_metadata() {
        let json = r#"{ "data": { "branches": [] } }"#;
        let response: BranchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_count(), 0);
        assert!(response.timestamp().is_none());
        assert_eq!(response.contact_count(), 0);
    }

    // -------------------------------------------------------------------------
    // Malformed records
    // -------------------------------------------------------------------------

    const GOOD: &str = r#"{ "branchId": "ok", "branchType": "Lokalforening", "branchName": "Oslo Lokalforening" }"#;

    fn with_sibling(sibling: &str) -> BranchResponse {
        let json = format!(r#"{{ "data": {{ "branches": [{}, {}] }} }}"#, GOOD, sibling);
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_parent_with_only_id() {
        let response = with_sibling(
            r#"{ "branchId": "b", "branchType": "Lokalforening", "branchName": "Asker",
                 "parent": { "branchId": "d-1" } }"#,
        );
        assert_eq!(response.branches().len(), 2);
        let branch = &response.branches()[1];
        assert_eq!(branch.parent.as_ref().map(|p| p.branch_id.as_str()), Some("d-1"));
        assert_eq!(branch.parent_name(), None);
    }

    #[test]
    fn test_null_contact_role() {
        let response = with_sibling(
            r#"{ "branchId": "b", "branchType": "Lokalforening", "branchName": "Asker",
                 "branchContacts": [ { "role": null, "firstName": "Kari", "isMember": null } ] }"#,
        );
        assert_eq!(response.branches().len(), 2);
        let contact = &response.branches()[1].branch_contacts[0];
        assert_eq!(contact.role, "");
        assert_eq!(contact.full_name(), "Kari");
        assert!(!contact.is_member);
    }

    #[test]
    fn test_null_lists_and_channels() {
        let response = with_sibling(
            r#"{ "branchId": "b", "branchType": "Distrikt", "branchName": "Agder Distrikt",
                 "branchActivities": null, "branchContacts": null,
                 "communicationChannels": null, "addresses": null, "branchStatus": null }"#,
        );
        assert_eq!(response.branches().len(), 2);
        let branch = &response.branches()[1];
        assert!(branch.branch_activities.is_empty());
        assert!(branch.branch_contacts.is_empty());
        assert!(branch.communication_channels.email.is_none());
        assert!(branch.postal().is_none());
        assert!(!branch.is_active());
    }

    #[test]
    fn test_branch_without_name_is_skipped() {
        let response = with_sibling(r#"{ "branchId": "b", "branchType": "Distrikt" }"#);
        let ids: Vec<&str> = response.branches().iter().map(|b| b.branch_id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn test_non_object_record_is_skipped() {
        let response = with_sibling("42");
        assert_eq!(response.branches().len(), 1);
    }

    #[test]
    fn test_null_envelope_parts() {
        let response: BranchResponse =
            serde_json::from_str(r#"{ "data": { "branches": null }, "metadata": { "totalCount": null } }"#)
                .unwrap();
        assert!(response.branches().is_empty());
        assert_eq!(response.total_count(), 0);

        let response: BranchResponse = serde_json::from_str(r#"{ "data": null, "metadata": null }"#).unwrap();
        assert!(response.branches().is_empty());
    }
}
