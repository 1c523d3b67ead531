//! Data models for the branch directory.
//!
//! - `Branch`, `BranchContact`: a branch and the people attached to it
//! - `BranchType`, `BranchStatus`: classification and lifecycle flags
//! - `BranchResponse`: the `{ data, metadata }` envelope the dataset ships in

pub mod branch;
pub mod response;

pub use branch::{
    Addresses, Branch, BranchContact, BranchStatus, BranchType, CommunicationChannels,
    OrganizationDetails, ParentBranch, PostalAddress,
};
pub use response::{BranchData, BranchResponse, Metadata};

use serde::{Deserialize, Deserializer};

// Helper to deserialize an explicit null as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
