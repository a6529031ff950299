//! Transaction drafts, the send request body, and history rows.

use serde::{Deserialize, Serialize};

use crate::amount::Satoshis;
use crate::paymail::Paymail;

/// An unconfirmed, client-side-only transfer intent.
///
/// Exists only until it is confirmed or cancelled; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub recipient: Paymail,
    pub amount: Satoshis,
}

impl TransactionDraft {
    pub fn new(recipient: Paymail, amount: Satoshis) -> Self {
        Self { recipient, amount }
    }

    /// Build the wire body for `POST /transaction`.
    pub fn into_request(self, password: impl Into<String>) -> NewTransaction {
        NewTransaction {
            recipient: self.recipient.into(),
            satoshis: self.amount.as_u64(),
            password: password.into(),
        }
    }
}

/// Body of `POST /transaction`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub recipient: String,
    pub satoshis: u64,
    pub password: String,
}

impl std::fmt::Debug for NewTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewTransaction")
            .field("recipient", &self.recipient)
            .field("satoshis", &self.satoshis)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A row of the transaction history as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub total_value: u64,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let draft = TransactionDraft::new(
            Paymail::parse("bob@bux.com").unwrap(),
            Satoshis::new(1500),
        );
        let json = serde_json::to_value(draft.into_request("hunter2")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "recipient": "bob@bux.com", "satoshis": 1500, "password": "hunter2" })
        );
    }

    #[test]
    fn debug_hides_password() {
        let req = NewTransaction {
            recipient: "bob@bux.com".into(),
            satoshis: 1,
            password: "hunter2".into(),
        };
        assert!(!format!("{req:?}").contains("hunter2"));
    }

    #[test]
    fn history_row_tolerates_missing_fields() {
        let row: Transaction =
            serde_json::from_str(r#"{"id":"abc","totalValue":700,"createdAt":"2023-01-01"}"#)
                .unwrap();
        assert_eq!(row.total_value, 700);
        assert_eq!(row.fee, 0);
        assert!(row.sender.is_none());
    }
}
