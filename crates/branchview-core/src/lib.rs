//! Core library for branchview.
//!
//! Provides the branch data model, dataset loading, and the pure
//! filter/search/sort functions the terminal UI runs on every keystroke:
//!
//! - `models`: `Branch`, `BranchContact` and the `BranchResponse` envelope
//! - `loader`: bundled or file-backed dataset, loaded once
//! - `filter`: branch search by name, type and status
//! - `contacts`: flattened contact list with role filter and sorting
//! - `utils`: case-insensitive matching, Norwegian collation, formatting

pub mod contacts;
pub mod filter;
pub mod loader;
pub mod models;
pub mod utils;

pub use contacts::{
    contacts_view, extract_contacts, filter_contacts, sort_contacts, ContactEntry, ContactFilter,
    ContactSortKey, RoleFilter, KNOWN_ROLES,
};
pub use filter::{filter_branches, BranchFilter, StatusFilter, TypeFilter};
pub use loader::{DataSource, LoadError, LoadState};
pub use models::{Branch, BranchContact, BranchResponse, BranchType};
