//! Branch search and filtering.
//!
//! `filter_branches` is a stable filter over the loaded snapshot: it returns
//! references to the matching branches in their input order and never
//! touches the source slice.

use crate::models::{Branch, BranchType};
use crate::utils::contains_ignore_case;

/// Type selection for the branch list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(BranchType),
}

impl TypeFilter {
    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "Alle typer",
            TypeFilter::Only(t) => t.label(),
        }
    }

    /// Cycle All -> Lokalforening -> Distrikt -> All
    pub fn next(&self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Only(BranchType::Lokalforening),
            TypeFilter::Only(BranchType::Lokalforening) => TypeFilter::Only(BranchType::Distrikt),
            TypeFilter::Only(_) => TypeFilter::All,
        }
    }

    fn matches(&self, branch: &Branch) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => branch.branch_type == *t,
        }
    }
}

/// Status selection for the branch list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Active,
    Terminated,
    All,
}

impl StatusFilter {
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Active => "Aktive",
            StatusFilter::Terminated => "Avsluttet",
            StatusFilter::All => "Alle status",
        }
    }

    /// Cycle in the same order the selector lists them
    pub fn next(&self) -> Self {
        match self {
            StatusFilter::Active => StatusFilter::Terminated,
            StatusFilter::Terminated => StatusFilter::All,
            StatusFilter::All => StatusFilter::Active,
        }
    }

    /// Parse the config/selector value ("active", "terminated", "all")
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "active" => Some(StatusFilter::Active),
            "terminated" => Some(StatusFilter::Terminated),
            "all" => Some(StatusFilter::All),
            _ => None,
        }
    }

    fn matches(&self, branch: &Branch) -> bool {
        match self {
            StatusFilter::Active => branch.is_active(),
            StatusFilter::Terminated => branch.is_terminated(),
            StatusFilter::All => true,
        }
    }
}

/// Everything the branch list is filtered by.
///
/// The default is the selection the viewer starts with: any type, active only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchFilter {
    pub query: String,
    pub branch_type: TypeFilter,
    pub status: StatusFilter,
}

impl BranchFilter {
    /// Selection that matches every branch
    pub fn all() -> Self {
        Self {
            query: String::new(),
            branch_type: TypeFilter::All,
            status: StatusFilter::All,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn matches(&self, branch: &Branch) -> bool {
        let query = self.query.to_lowercase();
        Self::matches_lowered(branch, &query, self.branch_type, self.status)
    }

    fn matches_lowered(
        branch: &Branch,
        query: &str,
        branch_type: TypeFilter,
        status: StatusFilter,
    ) -> bool {
        (query.is_empty() || contains_ignore_case(&branch.branch_name, query))
            && branch_type.matches(branch)
            && status.matches(branch)
    }
}

/// Return the branches matching `filter`, in input order.
pub fn filter_branches<'a>(branches: &'a [Branch], filter: &BranchFilter) -> Vec<&'a Branch> {
    let query = filter.query.to_lowercase();
    branches
        .iter()
        .filter(|b| BranchFilter::matches_lowered(b, &query, filter.branch_type, filter.status))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{BranchContact, BranchStatus};

    pub(crate) fn branch(id: &str, name: &str, branch_type: BranchType, active: bool, terminated: bool) -> Branch {
        Branch {
            branch_id: id.to_string(),
            branch_number: None,
            organization_number: None,
            branch_type,
            branch_name: name.to_string(),
            branch_status: BranchStatus {
                is_active: active,
                is_terminated: terminated,
                creation_date: None,
                termination_date: None,
            },
            parent: None,
            organization_details: None,
            addresses: Default::default(),
            communication_channels: Default::default(),
            geometry: None,
            branch_contacts: Vec::new(),
            branch_activities: Vec::new(),
        }
    }

    pub(crate) fn contact(first: &str, last: &str, role: &str) -> BranchContact {
        BranchContact {
            role: role.to_string(),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Default::default()
        }
    }

    /// Oslo (active, one contact) and Bergen (terminated, no contacts)
    pub(crate) fn oslo_bergen() -> Vec<Branch> {
        let mut a = branch("a", "Oslo Lokalforening", BranchType::Lokalforening, true, false);
        a.branch_contacts.push(contact("Kari", "Nordmann", "Leder"));
        let b = branch("b", "Bergen Distrikt", BranchType::Distrikt, false, true);
        vec![a, b]
    }

    fn ids(result: &[&Branch]) -> Vec<String> {
        result.iter().map(|b| b.branch_id.clone()).collect()
    }

    fn mixed() -> Vec<Branch> {
        vec![
            branch("1", "Oslo Lokalforening", BranchType::Lokalforening, true, false),
            branch("2", "Oslo Distrikt", BranchType::Distrikt, true, false),
            branch("3", "Asker Lokalforening", BranchType::Lokalforening, false, true),
            branch("4", "Bærum Lokalforening", BranchType::Lokalforening, true, false),
            branch("5", "Hedmark Distrikt", BranchType::Distrikt, false, false),
            branch("6", "Gamle Oslo Lokalforening", BranchType::Lokalforening, false, true),
        ]
    }

    #[test]
    fn test_query_matches_name() {
        let branches = oslo_bergen();
        let filter = BranchFilter::all().with_query("oslo");
        assert_eq!(ids(&filter_branches(&branches, &filter)), vec!["a"]);
    }

    #[test]
    fn test_active_status() {
        let branches = oslo_bergen();
        let filter = BranchFilter {
            status: StatusFilter::Active,
            ..BranchFilter::all()
        };
        assert_eq!(ids(&filter_branches(&branches, &filter)), vec!["a"]);
    }

    #[test]
    fn test_identity_selection_returns_everything() {
        let branches = mixed();
        let result = filter_branches(&branches, &BranchFilter::all());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let branches = mixed();
        let filters = [
            BranchFilter::all().with_query("oslo"),
            BranchFilter::default(),
            BranchFilter {
                branch_type: TypeFilter::Only(BranchType::Lokalforening),
                status: StatusFilter::Terminated,
                ..BranchFilter::all()
            },
            BranchFilter::all().with_query("lokal"),
        ];

        for filter in &filters {
            let result = filter_branches(&branches, filter);
            let positions: Vec<usize> = result
                .iter()
                .map(|r| branches.iter().position(|b| b.branch_id == r.branch_id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", filter);
        }
    }

    #[test]
    fn test_status_implies_flag() {
        let branches = mixed();
        let active = BranchFilter {
            status: StatusFilter::Active,
            ..BranchFilter::all()
        };
        let result = filter_branches(&branches, &active);
        assert!(result.iter().all(|b| b.is_active()));
        assert_eq!(ids(&result), vec!["1", "2", "4"]);

        let terminated = BranchFilter {
            status: StatusFilter::Terminated,
            ..BranchFilter::all()
        };
        let result = filter_branches(&branches, &terminated);
        assert!(result.iter().all(|b| b.is_terminated()));
        assert_eq!(ids(&result), vec!["3", "6"]);
    }

    #[test]
    fn test_neither_flag_only_shown_for_all() {
        let branches = mixed();
        let all = filter_branches(&branches, &BranchFilter::all());
        assert!(all.iter().any(|b| b.branch_id == "5"));
        let default = filter_branches(&branches, &BranchFilter::default());
        assert!(!default.iter().any(|b| b.branch_id == "5"));
    }

    #[test]
    fn test_type_filter() {
        let branches = mixed();
        let filter = BranchFilter {
            branch_type: TypeFilter::Only(BranchType::Distrikt),
            ..BranchFilter::all()
        };
        assert_eq!(ids(&filter_branches(&branches, &filter)), vec!["2", "5"]);
    }

    #[test]
    fn test_combined_query_type_status() {
        let branches = mixed();
        let filter = BranchFilter {
            query: "OSLO".to_string(),
            branch_type: TypeFilter::Only(BranchType::Lokalforening),
            status: StatusFilter::Active,
        };
        assert_eq!(ids(&filter_branches(&branches, &filter)), vec!["1"]);
    }

    #[test]
    fn test_query_is_case_insensitive_for_norwegian_letters() {
        let branches = mixed();
        let filter = BranchFilter::all().with_query("BÆRUM");
        assert_eq!(ids(&filter_branches(&branches, &filter)), vec!["4"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let branches = mixed();
        let filter = BranchFilter::all().with_query("tromsø");
        assert!(filter_branches(&branches, &filter).is_empty());
        assert!(filter_branches(&[], &BranchFilter::all()).is_empty());
    }

    #[test]
    fn test_single_matches_agrees_with_filter() {
        let branches = mixed();
        let filter = BranchFilter::all().with_query("distrikt");
        let expected: Vec<&Branch> = branches.iter().filter(|b| filter.matches(b)).collect();
        assert_eq!(ids(&filter_branches(&branches, &filter)), ids(&expected));
    }

    #[test]
    fn test_filter_cycles() {
        assert_eq!(TypeFilter::All.next(), TypeFilter::Only(BranchType::Lokalforening));
        assert_eq!(TypeFilter::All.next().next(), TypeFilter::Only(BranchType::Distrikt));
        assert_eq!(TypeFilter::All.next().next().next(), TypeFilter::All);

        assert_eq!(StatusFilter::Active.next(), StatusFilter::Terminated);
        assert_eq!(StatusFilter::Terminated.next(), StatusFilter::All);
        assert_eq!(StatusFilter::All.next(), StatusFilter::Active);
    }

    #[test]
    fn test_status_from_key() {
        assert_eq!(StatusFilter::from_key("active"), Some(StatusFilter::Active));
        assert_eq!(StatusFilter::from_key(" Terminated "), Some(StatusFilter::Terminated));
        assert_eq!(StatusFilter::from_key("all"), Some(StatusFilter::All));
        assert_eq!(StatusFilter::from_key("dormant"), None);
    }

    #[test]
    fn test_default_selection() {
        let filter = BranchFilter::default();
        assert_eq!(filter.branch_type, TypeFilter::All);
        assert_eq!(filter.status, StatusFilter::Active);
        assert!(filter.query.is_empty());
    }
}
