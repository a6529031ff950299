//! Contacts and their verification status.

use serde::{Deserialize, Serialize};

/// Verification status of a contact, as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactStatus {
    /// The peer added us; we have not accepted yet.
    #[serde(rename = "awaiting")]
    AwaitingAcceptance,
    /// Both sides verified each other's code.
    #[serde(rename = "confirmed")]
    Confirmed,
    /// Accepted but not yet verified.
    #[serde(rename = "unconfirmed")]
    Unconfirmed,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingAcceptance => "awaiting",
            Self::Confirmed => "confirmed",
            Self::Unconfirmed => "unconfirmed",
        }
    }
}

/// A contact entry from the paymail registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub paymail: String,
    #[serde(default)]
    pub full_name: String,
    pub status: ContactStatus,
}
