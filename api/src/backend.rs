//! The backend seam.

use async_trait::async_trait;
use bux_types::{Contact, LoggedInUser, NewTransaction, Transaction};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::pagination::PaginationParams;

/// Body of `POST /user/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /contact/confirmed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmContact {
    pub paymail: String,
    pub passcode: String,
}

/// Every backend call the wallet workflows make.
///
/// Each call is one request with the session credentials attached. No
/// implementation retries on its own; retries are user actions.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// `GET /user`
    async fn current_user(&self) -> Result<LoggedInUser, ApiError>;

    /// `POST /user/login`
    async fn login(&self, request: &LoginRequest) -> Result<LoggedInUser, ApiError>;

    /// `POST /user/logout`
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /transaction?{pagination}`
    async fn transactions(&self, page: &PaginationParams) -> Result<Vec<Transaction>, ApiError>;

    /// `GET /transaction/{id}`
    async fn transaction_details(&self, id: &str) -> Result<serde_json::Value, ApiError>;

    /// `POST /transaction`
    async fn send_transaction(&self, request: &NewTransaction) -> Result<(), ApiError>;

    /// `GET /contact`
    async fn contacts(&self) -> Result<Vec<Contact>, ApiError>;

    /// `PATCH /contact/accepted/{paymail}`
    async fn accept_contact(&self, paymail: &str) -> Result<(), ApiError>;

    /// `PATCH /contact/rejected/{paymail}`
    async fn reject_contact(&self, paymail: &str) -> Result<(), ApiError>;

    /// `POST /contact/confirmed`
    async fn confirm_contact(&self, request: &ConfirmContact) -> Result<(), ApiError>;
}
