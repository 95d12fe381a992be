//! Core data model - users and the action log
//!
//! Actions are immutable once loaded; the analytics layer only reads,
//! sorts, and filters local copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a user
pub type UserId = u64;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A single entry in the action log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: u64,
    /// What the user did
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// The acting user
    pub user_id: UserId,
    /// The referred user; only meaningful for `ReferUser`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Closed enumeration of action kinds in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "ADD_CONTACT")]
    AddContact,
    #[serde(rename = "EDIT_CONTACT")]
    EditContact,
    #[serde(rename = "REFER_USER")]
    ReferUser,
    #[serde(rename = "VIEW_CONTACTS")]
    ViewContacts,
}

impl ActionType {
    /// Parse the wire name of an action type. Unknown names are not an
    /// error anywhere in the system; callers treat `None` as "matches
    /// nothing in the log".
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADD_CONTACT" => Some(Self::AddContact),
            "EDIT_CONTACT" => Some(Self::EditContact),
            "REFER_USER" => Some(Self::ReferUser),
            "VIEW_CONTACTS" => Some(Self::ViewContacts),
            _ => None,
        }
    }
}
