//! Dataset loading.
//!
//! The directory is loaded exactly once per session, either from the payload
//! compiled into the binary or from a JSON file. `fetch` models the load as a
//! single asynchronous operation; its outcome is tracked in `LoadState`.

pub mod error;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::models::BranchResponse;

pub use error::LoadError;

/// Demo directory shipped with the binary
const BUNDLED_DATA: &str = include_str!("../../data/branches.json");

/// Where the directory payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Bundled => "bundled dataset".to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }

    /// Read and parse the payload synchronously.
    pub fn load(&self) -> Result<BranchResponse, LoadError> {
        match self {
            DataSource::Bundled => parse(BUNDLED_DATA),
            DataSource::File(path) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| LoadError::from_io(path.clone(), e))?;
                parse(&contents)
            }
        }
    }
}

/// Parse a `{ data: { branches }, metadata }` document.
pub fn parse(contents: &str) -> Result<BranchResponse, LoadError> {
    let response: BranchResponse = serde_json::from_str(contents)?;
    debug!(
        branches = response.branches().len(),
        total_count = response.metadata.total_count,
        "Parsed branch payload"
    );
    Ok(response)
}

/// Load `source` once, after an optional artificial delay.
pub async fn fetch(source: DataSource, delay: Duration) -> Result<BranchResponse, LoadError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let response = match &source {
        DataSource::Bundled => parse(BUNDLED_DATA)?,
        DataSource::File(path) => {
            let contents = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::from_io(path.clone(), e))?;
            parse(&contents)?
        }
    };

    info!(
        source = %source.describe(),
        branches = response.branches().len(),
        contacts = response.contact_count(),
        "Branch directory loaded"
    );
    Ok(response)
}

/// Observable state of the one-shot load.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(BranchResponse),
    Failed(String),
}

impl LoadState {
    /// Record the outcome of the load. Only the first outcome counts.
    pub fn resolve(&mut self, result: Result<BranchResponse, LoadError>) -> bool {
        match result {
            Ok(response) => {
                if !self.is_pending() {
                    return false;
                }
                *self = LoadState::Ready(response);
                true
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Mark the load as failed without a `LoadError`, e.g. when the task died.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = LoadState::Failed(message.into());
        true
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn response(&self) -> Option<&BranchResponse> {
        match self {
            LoadState::Ready(response) => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        let response = DataSource::Bundled.load().unwrap();
        assert!(!response.branches().is_empty());
        assert_eq!(response.total_count(), response.branches().len());

        let mut ids: Vec<&str> = response.branches().iter().map(|b| b.branch_id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before, "branch ids must be unique");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data": {{"branches": [{{"branchId": "x", "branchType": "Distrikt", "branchName": "Troms Distrikt"}}]}}, "metadata": {{"totalCount": 1, "timestamp": "2024-01-01T00:00:00Z"}}}}"#
        )
        .unwrap();

        let response = DataSource::File(file.path().to_path_buf()).load().unwrap();
        assert_eq!(response.branches()[0].branch_name, "Troms Distrikt");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = DataSource::File(path.clone()).load().unwrap_err();
        assert!(matches!(err, LoadError::NotFound(p) if p == path));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("Invalid branch data"));
    }

    #[test]
    fn test_parse_keeps_good_branches_next_to_bad_ones() {
        let response = parse(
            r#"{ "data": { "branches": [
                { "branchId": "a", "branchType": "Lokalforening", "branchName": "Oslo Lokalforening",
                  "branchContacts": [ { "role": null, "firstName": "Kari" } ],
                  "branchActivities": null },
                { "branchId": "b", "branchType": "Distrikt" },
                { "branchId": "c", "branchType": "Distrikt", "branchName": "Agder Distrikt",
                  "parent": { "branchId": "x" }, "communicationChannels": null }
            ] } }"#,
        )
        .unwrap();

        let ids: Vec<&str> = response.branches().iter().map(|b| b.branch_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(response.contact_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_bundled_without_delay() {
        let response = fetch(DataSource::Bundled, Duration::ZERO).await.unwrap();
        assert!(!response.branches().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = fetch(DataSource::File(dir.path().join("missing.json")), Duration::ZERO).await;
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_load_state_resolves_once() {
        let mut state = LoadState::default();
        assert!(state.is_pending());

        assert!(state.resolve(parse(r#"{"data": {"branches": []}}"#)));
        assert!(state.response().is_some());

        // A second outcome is ignored
        assert!(!state.resolve(parse("broken")));
        assert!(state.response().is_some());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_load_state_failure_message() {
        let mut state = LoadState::Pending;
        state.resolve(Err(LoadError::NotFound(PathBuf::from("/tmp/x.json"))));
        assert_eq!(state.error(), Some("Data file not found: /tmp/x.json"));
        assert!(state.response().is_none());

        assert!(!state.fail("again"));
        assert_eq!(state.error(), Some("Data file not found: /tmp/x.json"));
    }
}
