//! Nullable backend: scripted responses, recorded calls, no network.

use async_trait::async_trait;
use bux_api::{ApiError, ConfirmContact, LoginRequest, PaginationParams, WalletBackend};
use bux_types::{Contact, LoggedInUser, NewTransaction, Transaction};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clock::NullClock;

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    CurrentUser,
    Login { email: String },
    Logout,
    Transactions(PaginationParams),
    TransactionDetails(String),
    SendTransaction(NewTransaction),
    Contacts,
    AcceptContact(String),
    RejectContact(String),
    ConfirmContact(ConfirmContact),
}

/// A backend that records calls instead of sending them.
///
/// Responses are configured up front. Queued results (`push_*`) are consumed
/// one per call; once a queue is empty the call succeeds. With a clock
/// attached, every call advances it by the configured latency, which lets
/// tests observe time passing across a request.
pub struct NullBackend {
    calls: Mutex<Vec<BackendCall>>,
    user: Mutex<Result<LoggedInUser, ApiError>>,
    transactions: Mutex<Result<Vec<Transaction>, ApiError>>,
    contacts: Mutex<Result<Vec<Contact>, ApiError>>,
    send_results: Mutex<VecDeque<Result<(), ApiError>>>,
    contact_results: Mutex<VecDeque<Result<(), ApiError>>>,
    latency: Option<(Arc<NullClock>, Duration)>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            user: Mutex::new(Ok(LoggedInUser {
                email: "alice@example.com".into(),
                paymail: "alice@bux.com".into(),
                balance: 0,
            })),
            transactions: Mutex::new(Ok(Vec::new())),
            contacts: Mutex::new(Ok(Vec::new())),
            send_results: Mutex::new(VecDeque::new()),
            contact_results: Mutex::new(VecDeque::new()),
            latency: None,
        }
    }

    /// Advance `clock` by `latency` on every call.
    pub fn with_latency(mut self, clock: Arc<NullClock>, latency: Duration) -> Self {
        self.latency = Some((clock, latency));
        self
    }

    pub fn set_user(&self, user: Result<LoggedInUser, ApiError>) {
        *self.user.lock().unwrap() = user;
    }

    pub fn set_transactions(&self, rows: Result<Vec<Transaction>, ApiError>) {
        *self.transactions.lock().unwrap() = rows;
    }

    pub fn set_contacts(&self, contacts: Result<Vec<Contact>, ApiError>) {
        *self.contacts.lock().unwrap() = contacts;
    }

    /// Queue the result of the next `send_transaction`.
    pub fn push_send_result(&self, result: Result<(), ApiError>) {
        self.send_results.lock().unwrap().push_back(result);
    }

    /// Queue the result of the next accept/reject/confirm contact call.
    pub fn push_contact_result(&self, result: Result<(), ApiError>) {
        self.contact_results.lock().unwrap().push_back(result);
    }

    /// All calls so far (for assertions).
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every `send_transaction` body received.
    pub fn sent_transactions(&self) -> Vec<NewTransaction> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                BackendCall::SendTransaction(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls, keeping configured responses.
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: BackendCall) {
        if let Some((clock, latency)) = &self.latency {
            clock.advance(*latency);
        }
        self.calls.lock().unwrap().push(call);
    }

    fn next_contact_result(&self) -> Result<(), ApiError> {
        self.contact_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletBackend for NullBackend {
    async fn current_user(&self) -> Result<LoggedInUser, ApiError> {
        self.record(BackendCall::CurrentUser);
        self.user.lock().unwrap().clone()
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoggedInUser, ApiError> {
        self.record(BackendCall::Login {
            email: request.email.clone(),
        });
        self.user.lock().unwrap().clone()
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record(BackendCall::Logout);
        Ok(())
    }

    async fn transactions(&self, page: &PaginationParams) -> Result<Vec<Transaction>, ApiError> {
        self.record(BackendCall::Transactions(page.clone()));
        self.transactions.lock().unwrap().clone()
    }

    async fn transaction_details(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.record(BackendCall::TransactionDetails(id.to_string()));
        let rows = self.transactions.lock().unwrap().clone()?;
        rows.into_iter()
            .find(|t| t.id == id)
            .map(|t| serde_json::to_value(t).unwrap_or_default())
            .ok_or_else(|| ApiError::NotFound {
                body: Some(format!("transaction {id} not found")),
            })
    }

    async fn send_transaction(&self, request: &NewTransaction) -> Result<(), ApiError> {
        self.record(BackendCall::SendTransaction(request.clone()));
        self.send_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.record(BackendCall::Contacts);
        self.contacts.lock().unwrap().clone()
    }

    async fn accept_contact(&self, paymail: &str) -> Result<(), ApiError> {
        self.record(BackendCall::AcceptContact(paymail.to_string()));
        self.next_contact_result()
    }

    async fn reject_contact(&self, paymail: &str) -> Result<(), ApiError> {
        self.record(BackendCall::RejectContact(paymail.to_string()));
        self.next_contact_result()
    }

    async fn confirm_contact(&self, request: &ConfirmContact) -> Result<(), ApiError> {
        self.record(BackendCall::ConfirmContact(request.clone()));
        self.next_contact_result()
    }
}
