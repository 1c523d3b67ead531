//! Flattened contact directory.
//!
//! Contacts only exist inside their branch. For the contact view they are
//! flattened into `ContactEntry` records (branch-major, contact-minor order),
//! filtered, then ordered by one of three keys with Norwegian collation.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{Branch, BranchContact, BranchType};
use crate::utils::{compare_nb, contains_ignore_case};

/// Roles offered by the role selector, in display order
pub const KNOWN_ROLES: [&str; 3] = ["Leder", "Nestleder", "Webredaktør"];

/// A contact together with the identity of the branch that owns it.
#[derive(Debug, Clone, Serialize)]
pub struct ContactEntry<'a> {
    #[serde(flatten)]
    pub contact: &'a BranchContact,
    #[serde(rename = "branchId")]
    pub branch_id: &'a str,
    #[serde(rename = "branchName")]
    pub branch_name: &'a str,
    #[serde(rename = "branchType")]
    pub branch_type: BranchType,
    /// Position of the contact within its branch's list
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl<'a> ContactEntry<'a> {
    fn new(branch: &'a Branch, index: usize, contact: &'a BranchContact) -> Self {
        Self {
            contact,
            branch_id: &branch.branch_id,
            branch_name: &branch.branch_name,
            branch_type: branch.branch_type,
            index,
            full_name: contact.full_name(),
        }
    }

    pub fn role(&self) -> &'a str {
        &self.contact.role
    }

    /// Display key: contacts have no identity of their own
    pub fn key(&self) -> String {
        format!("{}-{}", self.branch_id, self.index)
    }

    /// Query should already be lowercased.
    fn matches_query(&self, query: &str) -> bool {
        contains_ignore_case(&self.full_name, query)
            || contains_ignore_case(self.role(), query)
            || contains_ignore_case(self.branch_name, query)
    }
}

/// Role selection for the contact view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Role(String),
}

impl RoleFilter {
    pub fn label(&self) -> &str {
        match self {
            RoleFilter::All => "Alle roller",
            RoleFilter::Role(role) => role,
        }
    }

    /// Cycle All -> each of `KNOWN_ROLES` -> All
    pub fn next(&self) -> Self {
        let position = match self {
            RoleFilter::All => None,
            RoleFilter::Role(role) => KNOWN_ROLES.iter().position(|r| r == role),
        };
        let next = match (self, position) {
            (RoleFilter::All, _) => Some(0),
            (_, Some(i)) if i + 1 < KNOWN_ROLES.len() => Some(i + 1),
            _ => None,
        };
        match next {
            Some(i) => RoleFilter::Role(KNOWN_ROLES[i].to_string()),
            None => RoleFilter::All,
        }
    }

    fn matches(&self, role: &str) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Role(selected) => role == selected,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub query: String,
    pub role: RoleFilter,
}

/// Which column the contact view is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactSortKey {
    #[default]
    Name,
    Role,
    Branch,
}

impl ContactSortKey {
    pub fn label(&self) -> &'static str {
        match self {
            ContactSortKey::Name => "Navn",
            ContactSortKey::Role => "Rolle",
            ContactSortKey::Branch => "Avdeling",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ContactSortKey::Name => ContactSortKey::Role,
            ContactSortKey::Role => ContactSortKey::Branch,
            ContactSortKey::Branch => ContactSortKey::Name,
        }
    }

    fn field<'e>(&self, entry: &'e ContactEntry<'_>) -> &'e str {
        match self {
            ContactSortKey::Name => &entry.full_name,
            ContactSortKey::Role => entry.role(),
            ContactSortKey::Branch => entry.branch_name,
        }
    }

    /// Compare two entries by this key. Ties fall back to the owning branch
    /// and position so the result does not depend on the previous order.
    pub fn compare(&self, a: &ContactEntry<'_>, b: &ContactEntry<'_>) -> Ordering {
        compare_nb(self.field(a), self.field(b))
            .then_with(|| a.branch_id.cmp(b.branch_id))
            .then_with(|| a.index.cmp(&b.index))
    }
}

/// Flatten every branch's contacts, keeping branch order then contact order.
pub fn extract_contacts(branches: &[Branch]) -> Vec<ContactEntry<'_>> {
    branches
        .iter()
        .flat_map(|branch| {
            branch
                .branch_contacts
                .iter()
                .enumerate()
                .map(move |(index, contact)| ContactEntry::new(branch, index, contact))
        })
        .collect()
}

/// Keep the entries matching the query and role selection.
pub fn filter_contacts<'a>(
    entries: Vec<ContactEntry<'a>>,
    filter: &ContactFilter,
) -> Vec<ContactEntry<'a>> {
    let query = filter.query.to_lowercase();
    entries
        .into_iter()
        .filter(|e| query.is_empty() || e.matches_query(&query))
        .filter(|e| filter.role.matches(e.role()))
        .collect()
}

pub fn sort_contacts(entries: &mut [ContactEntry<'_>], key: ContactSortKey) {
    entries.sort_by(|a, b| key.compare(a, b));
}

/// Extract, filter and sort in one go, as the contact view needs it.
pub fn contacts_view<'a>(
    branches: &'a [Branch],
    filter: &ContactFilter,
    key: ContactSortKey,
) -> Vec<ContactEntry<'a>> {
    let mut entries = filter_contacts(extract_contacts(branches), filter);
    sort_contacts(&mut entries, key);
    entries
}
