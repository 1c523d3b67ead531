use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::utils::format::format_date;

/// Classification of a branch in the organization hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BranchType {
    Lokalforening,
    Distrikt,
    /// Anything the dataset uses that we don't know about yet
    #[default]
    #[serde(other)]
    Unknown,
}

impl BranchType {
    pub fn label(&self) -> &'static str {
        match self {
            BranchType::Lokalforening => "Lokalforening",
            BranchType::Distrikt => "Distrikt",
            BranchType::Unknown => "Ukjent",
        }
    }
}

impl std::fmt::Display for BranchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle flags for a branch.
///
/// `is_active` and `is_terminated` are independent: the data does not promise
/// that exactly one of them is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchStatus {
    #[serde(rename = "isActive", default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(rename = "isTerminated", default, deserialize_with = "null_as_default")]
    pub is_terminated: bool,
    #[serde(rename = "creationDate", default)]
    pub creation_date: Option<String>,
    #[serde(rename = "terminationDate", default)]
    pub termination_date: Option<String>,
}

impl BranchStatus {
    pub fn label(&self) -> &'static str {
        match (self.is_active, self.is_terminated) {
            (true, _) => "Aktiv",
            (false, true) => "Avsluttet",
            (false, false) => "Ukjent status",
        }
    }

    pub fn created_display(&self) -> Option<String> {
        self.creation_date.as_deref().map(format_date)
    }

    pub fn terminated_display(&self) -> Option<String> {
        self.termination_date.as_deref().map(format_date)
    }
}

/// Reference to the owning branch. Only the name is shown, so every field
/// may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParentBranch {
    #[serde(rename = "branchId", default, deserialize_with = "null_as_default")]
    pub branch_id: String,
    #[serde(rename = "branchNumber", default)]
    pub branch_number: Option<String>,
    #[serde(rename = "branchName", default)]
    pub branch_name: Option<String>,
    #[serde(rename = "branchType", default, deserialize_with = "null_as_default")]
    pub branch_type: BranchType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationDetails {
    pub description: Option<String>,
    #[serde(rename = "organizationLevel")]
    pub organization_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "addressLine1", default)]
    pub address_line1: Option<String>,
    #[serde(rename = "addressLine2", default)]
    pub address_line2: Option<String>,
    #[serde(rename = "postalCode", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "postOffice", default)]
    pub post_office: Option<String>,
}

impl PostalAddress {
    /// "0150 OSLO" style line, or None if both parts are missing
    pub fn postal_line(&self) -> Option<String> {
        match (self.postal_code.as_deref(), self.post_office.as_deref()) {
            (Some(code), Some(office)) => Some(format!("{} {}", code, office)),
            (Some(code), None) => Some(code.to_string()),
            (None, Some(office)) => Some(office.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Addresses {
    pub municipality: Option<String>,
    pub region: Option<String>,
    pub postal: Option<PostalAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunicationChannels {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub web: Option<String>,
}

/// A named person attached to a branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchContact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "jobTitle", default)]
    pub job_title: Option<String>,
    #[serde(rename = "isVolunteer", default, deserialize_with = "null_as_default")]
    pub is_volunteer: bool,
    #[serde(rename = "isMember", default, deserialize_with = "null_as_default")]
    pub is_member: bool,
    #[serde(rename = "memberNumber", default)]
    pub member_number: Option<String>,
}

impl BranchContact {
    /// First and last name joined by a space, trimmed
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// A single organizational unit: a local chapter or a district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "branchId")]
    pub branch_id: String,
    #[serde(rename = "branchNumber", default)]
    pub branch_number: Option<String>,
    #[serde(rename = "organizationNumber", default)]
    pub organization_number: Option<String>,
    #[serde(rename = "branchType")]
    pub branch_type: BranchType,
    #[serde(rename = "branchName")]
    pub branch_name: String,
    #[serde(rename = "branchStatus", default, deserialize_with = "null_as_default")]
    pub branch_status: BranchStatus,
    #[serde(default)]
    pub parent: Option<ParentBranch>,
    #[serde(rename = "organizationDetails", default)]
    pub organization_details: Option<OrganizationDetails>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Addresses,
    #[serde(rename = "communicationChannels", default, deserialize_with = "null_as_default")]
    pub communication_channels: CommunicationChannels,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    #[serde(rename = "branchContacts", default, deserialize_with = "null_as_default")]
    pub branch_contacts: Vec<BranchContact>,
    #[serde(rename = "branchActivities", default, deserialize_with = "null_as_default")]
    pub branch_activities: Vec<String>,
}

impl Branch {
    pub fn is_active(&self) -> bool {
        self.branch_status.is_active
    }

    pub fn is_terminated(&self) -> bool {
        self.branch_status.is_terminated
    }

    pub fn postal(&self) -> Option<&PostalAddress> {
        self.addresses.postal.as_ref()
    }

    /// Street line of the postal address, if there is one
    pub fn address_line(&self) -> Option<&str> {
        self.postal()
            .and_then(|p| p.address_line1.as_deref())
            .filter(|a| !a.trim().is_empty())
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent
            .as_ref()
            .and_then(|p| p.branch_name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}
