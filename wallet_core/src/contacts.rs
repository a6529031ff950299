//! Contact list and the verification prompt.
//!
//! Statuses come from the backend only. Every action that can change a
//! status is followed by a refresh of the list.

use bux_api::{ApiError, ConfirmContact, WalletBackend};
use bux_types::{Contact, ContactStatus};
use std::cmp::Ordering;

use crate::error::ContactError;
use crate::notification::Notice;
use crate::session::SOMETHING_WENT_WRONG;

pub const CONTACTS_LOAD_FAILED: &str = "Failed to load contacts";

/// Which control a contact row offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactAction {
    /// Peer is waiting on us: accept or reject.
    AcceptReject,
    /// Open the verification prompt to show our code.
    ShowCode,
}

impl ContactAction {
    pub fn for_status(status: ContactStatus) -> Self {
        match status {
            ContactStatus::AwaitingAcceptance => Self::AcceptReject,
            ContactStatus::Confirmed | ContactStatus::Unconfirmed => Self::ShowCode,
        }
    }
}

/// The open verification prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerificationPrompt<'a> {
    pub contact: &'a Contact,
    pub just_added: bool,
}

impl VerificationPrompt<'_> {
    /// Show the "you just added this contact" helper text.
    pub fn show_just_added_message(&self) -> bool {
        self.just_added && self.contact.status == ContactStatus::Unconfirmed
    }
}

/// Default row ordering: awaiting first, then unconfirmed, then confirmed;
/// paymail breaks ties.
pub fn default_ordering(a: &Contact, b: &Contact) -> Ordering {
    fn rank(s: ContactStatus) -> u8 {
        match s {
            ContactStatus::AwaitingAcceptance => 0,
            ContactStatus::Unconfirmed => 1,
            ContactStatus::Confirmed => 2,
        }
    }
    rank(a.status)
        .cmp(&rank(b.status))
        .then_with(|| a.paymail.cmp(&b.paymail))
}

#[derive(Debug, Default)]
pub struct ContactsBoard {
    contacts: Option<Vec<Contact>>,
    loading: bool,
    error: Option<Notice>,
    selected: Option<String>,
    just_added: bool,
}

impl ContactsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the list from the backend.
    pub async fn refresh(&mut self, backend: &dyn WalletBackend) -> Result<(), ApiError> {
        self.loading = true;
        let result = backend.contacts().await;
        self.loading = false;
        match result {
            Ok(contacts) => {
                tracing::debug!(count = contacts.len(), "contacts loaded");
                self.contacts = Some(contacts);
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load contacts");
                self.error = Some(Notice::error(CONTACTS_LOAD_FAILED));
                Err(err)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// `None` until the first successful load.
    pub fn contacts(&self) -> Option<&[Contact]> {
        self.contacts.as_deref()
    }

    pub fn find(&self, paymail: &str) -> Option<&Contact> {
        self.contacts
            .as_deref()?
            .iter()
            .find(|c| c.paymail == paymail)
    }

    /// Contacts ordered by `compare`.
    pub fn sorted_by<F>(&self, mut compare: F) -> Vec<&Contact>
    where
        F: FnMut(&Contact, &Contact) -> Ordering,
    {
        let mut rows: Vec<&Contact> = self.contacts.iter().flatten().collect();
        rows.sort_by(|a, b| compare(a, b));
        rows
    }

    pub fn sorted(&self) -> Vec<&Contact> {
        self.sorted_by(default_ordering)
    }

    pub fn action_for(&self, paymail: &str) -> Option<ContactAction> {
        self.find(paymail).map(|c| ContactAction::for_status(c.status))
    }

    /// Accept a pending contact and open its verification prompt.
    pub async fn accept(
        &mut self,
        backend: &dyn WalletBackend,
        paymail: &str,
    ) -> Result<(), ContactError> {
        self.require_awaiting(paymail)?;
        self.report(backend.accept_contact(paymail).await)?;
        self.open_prompt(paymail, true);
        self.refresh(backend).await?;
        Ok(())
    }

    /// Reject a pending contact. The list refreshes; nothing else changes.
    pub async fn reject(
        &mut self,
        backend: &dyn WalletBackend,
        paymail: &str,
    ) -> Result<(), ContactError> {
        self.require_awaiting(paymail)?;
        self.report(backend.reject_contact(paymail).await)?;
        self.refresh(backend).await?;
        Ok(())
    }

    /// Open the verification prompt for an already accepted contact.
    pub fn show_code(&mut self, paymail: &str) -> Result<(), ContactError> {
        let contact = self
            .find(paymail)
            .ok_or_else(|| ContactError::UnknownContact(paymail.to_string()))?;
        if contact.status == ContactStatus::AwaitingAcceptance {
            return Err(ContactError::AwaitingAcceptance(paymail.to_string()));
        }
        self.open_prompt(paymail, false);
        Ok(())
    }

    /// The open prompt, resolved against the current list.
    pub fn prompt(&self) -> Option<VerificationPrompt<'_>> {
        let contact = self.find(self.selected.as_deref()?)?;
        Some(VerificationPrompt {
            contact,
            just_added: self.just_added,
        })
    }

    /// Confirm the peer's verification code for the open prompt.
    pub async fn confirm(
        &mut self,
        backend: &dyn WalletBackend,
        passcode: &str,
    ) -> Result<(), ContactError> {
        let paymail = self
            .prompt()
            .map(|p| p.contact.paymail.clone())
            .ok_or(ContactError::NoPrompt)?;
        let request = ConfirmContact {
            paymail,
            passcode: passcode.to_string(),
        };
        self.report(backend.confirm_contact(&request).await)?;
        self.refresh(backend).await?;
        Ok(())
    }

    pub fn close_prompt(&mut self) {
        self.selected = None;
        self.just_added = false;
    }

    fn open_prompt(&mut self, paymail: &str, just_added: bool) {
        self.selected = Some(paymail.to_string());
        self.just_added = just_added;
    }

    fn require_awaiting(&self, paymail: &str) -> Result<(), ContactError> {
        match self.find(paymail) {
            None => Err(ContactError::UnknownContact(paymail.to_string())),
            Some(c) if c.status != ContactStatus::AwaitingAcceptance => {
                Err(ContactError::NotAwaiting(paymail.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    fn report(&mut self, result: Result<(), ApiError>) -> Result<(), ApiError> {
        if let Err(err) = &result {
            tracing::warn!(%err, "contact action failed");
            self.error = Some(Notice::error(err.body().unwrap_or(SOMETHING_WENT_WRONG)));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bux_nullables::{BackendCall, NullBackend};

    fn contact(paymail: &str, status: ContactStatus) -> Contact {
        Contact {
            paymail: paymail.to_string(),
            full_name: paymail.split('@').next().unwrap_or_default().to_string(),
            status,
        }
    }

    fn backend_with(contacts: Vec<Contact>) -> NullBackend {
        let backend = NullBackend::new();
        backend.set_contacts(Ok(contacts));
        backend
    }

    async fn loaded(backend: &NullBackend) -> ContactsBoard {
        let mut board = ContactsBoard::new();
        board.refresh(backend).await.unwrap();
        backend.reset_calls();
        board
    }

    #[tokio::test]
    async fn load_failure_shows_banner() {
        let backend = NullBackend::new();
        backend.set_contacts(Err(ApiError::from_status(500, None)));
        let mut board = ContactsBoard::new();
        assert!(board.refresh(&backend).await.is_err());
        assert_eq!(board.error().unwrap().message, "Failed to load contacts");
        assert!(board.contacts().is_none());
        assert!(!board.is_loading());
    }

    #[tokio::test]
    async fn actions_follow_status() {
        let backend = backend_with(vec![
            contact("a@bux.com", ContactStatus::AwaitingAcceptance),
            contact("b@bux.com", ContactStatus::Confirmed),
            contact("c@bux.com", ContactStatus::Unconfirmed),
        ]);
        let board = loaded(&backend).await;
        assert_eq!(board.action_for("a@bux.com"), Some(ContactAction::AcceptReject));
        assert_eq!(board.action_for("b@bux.com"), Some(ContactAction::ShowCode));
        assert_eq!(board.action_for("c@bux.com"), Some(ContactAction::ShowCode));
        assert_eq!(board.action_for("z@bux.com"), None);
    }

    #[tokio::test]
    async fn accept_opens_prompt_as_just_added_and_refreshes() {
        let backend = backend_with(vec![contact("a@bux.com", ContactStatus::AwaitingAcceptance)]);
        let mut board = loaded(&backend).await;

        // backend moves the contact along once accepted
        backend.set_contacts(Ok(vec![contact("a@bux.com", ContactStatus::Unconfirmed)]));
        board.accept(&backend, "a@bux.com").await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![BackendCall::AcceptContact("a@bux.com".into()), BackendCall::Contacts]
        );
        let prompt = board.prompt().unwrap();
        assert!(prompt.just_added);
        assert!(prompt.show_just_added_message());
    }

    #[tokio::test]
    async fn just_added_message_needs_unconfirmed_status() {
        let backend = backend_with(vec![contact("a@bux.com", ContactStatus::AwaitingAcceptance)]);
        let mut board = loaded(&backend).await;
        backend.set_contacts(Ok(vec![contact("a@bux.com", ContactStatus::Confirmed)]));
        board.accept(&backend, "a@bux.com").await.unwrap();
        assert!(!board.prompt().unwrap().show_just_added_message());
    }

    #[tokio::test]
    async fn reject_refreshes_without_prompt() {
        let backend = backend_with(vec![contact("a@bux.com", ContactStatus::AwaitingAcceptance)]);
        let mut board = loaded(&backend).await;
        backend.set_contacts(Ok(Vec::new()));
        board.reject(&backend, "a@bux.com").await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![BackendCall::RejectContact("a@bux.com".into()), BackendCall::Contacts]
        );
        assert!(board.prompt().is_none());
        assert_eq!(board.contacts().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn accept_requires_awaiting_status() {
        let backend = backend_with(vec![contact("b@bux.com", ContactStatus::Confirmed)]);
        let mut board = loaded(&backend).await;
        assert_eq!(
            board.accept(&backend, "b@bux.com").await.unwrap_err(),
            ContactError::NotAwaiting("b@bux.com".into())
        );
        assert_eq!(
            board.reject(&backend, "nobody@bux.com").await.unwrap_err(),
            ContactError::UnknownContact("nobody@bux.com".into())
        );
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_accept_reports_and_keeps_prompt_closed() {
        let backend = backend_with(vec![contact("a@bux.com", ContactStatus::AwaitingAcceptance)]);
        let mut board = loaded(&backend).await;
        backend.push_contact_result(Err(ApiError::from_status(500, Some("registry down".into()))));

        let err = board.accept(&backend, "a@bux.com").await.unwrap_err();
        assert!(matches!(err, ContactError::Api(_)));
        assert_eq!(board.error().unwrap().message, "registry down");
        assert!(board.prompt().is_none());
    }

    #[tokio::test]
    async fn bodiless_failure_shows_generic_message() {
        let backend = backend_with(vec![contact("a@bux.com", ContactStatus::AwaitingAcceptance)]);
        let mut board = loaded(&backend).await;
        backend.push_contact_result(Err(ApiError::from_status(500, None)));

        assert!(board.reject(&backend, "a@bux.com").await.is_err());
        assert_eq!(board.error().unwrap().message, SOMETHING_WENT_WRONG);
    }

    #[tokio::test]
    async fn show_code_and_close() {
        let backend = backend_with(vec![
            contact("a@bux.com", ContactStatus::AwaitingAcceptance),
            contact("c@bux.com", ContactStatus::Unconfirmed),
        ]);
        let mut board = loaded(&backend).await;

        assert!(board.show_code("a@bux.com").is_err());
        board.show_code("c@bux.com").unwrap();
        let prompt = board.prompt().unwrap();
        assert!(!prompt.just_added);
        assert!(!prompt.show_just_added_message());

        board.close_prompt();
        assert!(board.prompt().is_none());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn confirm_sends_code_and_refreshes() {
        let backend = backend_with(vec![contact("c@bux.com", ContactStatus::Unconfirmed)]);
        let mut board = loaded(&backend).await;
        assert_eq!(
            board.confirm(&backend, "123456").await.unwrap_err(),
            ContactError::NoPrompt
        );

        board.show_code("c@bux.com").unwrap();
        backend.set_contacts(Ok(vec![contact("c@bux.com", ContactStatus::Confirmed)]));
        board.confirm(&backend, "123456").await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::ConfirmContact(ConfirmContact {
                    paymail: "c@bux.com".into(),
                    passcode: "123456".into(),
                }),
                BackendCall::Contacts,
            ]
        );
        assert_eq!(board.prompt().unwrap().contact.status, ContactStatus::Confirmed);
    }

    #[tokio::test]
    async fn sorting_is_caller_controlled() {
        let backend = backend_with(vec![
            contact("z@bux.com", ContactStatus::Confirmed),
            contact("m@bux.com", ContactStatus::AwaitingAcceptance),
            contact("a@bux.com", ContactStatus::Unconfirmed),
        ]);
        let board = loaded(&backend).await;

        let default: Vec<_> = board.sorted().iter().map(|c| c.paymail.as_str()).collect();
        assert_eq!(default, ["m@bux.com", "a@bux.com", "z@bux.com"]);

        let by_name: Vec<_> = board
            .sorted_by(|a, b| a.paymail.cmp(&b.paymail))
            .iter()
            .map(|c| c.paymail.as_str())
            .collect();
        assert_eq!(by_name, ["a@bux.com", "m@bux.com", "z@bux.com"]);
    }
}
