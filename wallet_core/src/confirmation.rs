//! Password-gated confirmation of a transaction draft.
//!
//! The dialog owns the password input, the loading flag, and the error and
//! success banners for one draft. A submission is split in two so a driver
//! can run the request wherever it likes:
//!
//! 1. [`ConfirmationDialog::begin_submit`] validates, guards against a second
//!    in-flight submission, and hands back the request plus a cancel token.
//! 2. [`ConfirmationDialog::finish_submit`] applies the backend's answer,
//!    unless the dialog was closed in the meantime.
//!
//! [`ConfirmationDialog::submit`] runs both against a [`WalletBackend`].
//! On success the dialog stays up showing the success message until
//! [`AUTO_DISMISS_AFTER`] has elapsed on the dialog's clock; [`tick`] reports
//! the auto-close.
//!
//! [`tick`]: ConfirmationDialog::tick

use bux_api::{ApiError, WalletBackend};
use bux_types::{Clock, NewTransaction, Timestamp, TransactionDraft, ValidationError};
use std::sync::Arc;
use std::time::Duration;

use crate::autoupdate::Autoupdate;
use crate::cancel::CancelToken;
use crate::error::ConfirmError;
use crate::notification::Notice;
use crate::validation::is_password_present;

pub const SUCCESS_MESSAGE: &str = "Great! Transaction sent to receiver!";
pub const SESSION_EXPIRED: &str = "Session expired! Please login in to your wallet";
pub const MALFORMED_TRANSFER: &str =
    "Transfer was not sent. Probably you filled the form with incorrect data. Please try once again!";
pub const TRANSFER_FAILED: &str = "Transfer was not sent. Please verify transfer data and try once again. If problem will happen again, contact with our support.";

/// How long the success message stays up before the dialog closes itself.
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// Outcome of a submission that reached the backend (or failed to).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionResult {
    Success,
    /// 401: the session cookie expired.
    AuthExpired,
    /// 400: the backend rejected the submitted data.
    BadRequest,
    /// Anything else; carries the message to show.
    ServerError(String),
}

impl TransactionResult {
    pub fn from_response(response: Result<(), ApiError>) -> Self {
        match response {
            Ok(()) => Self::Success,
            Err(ApiError::Unauthorized { .. }) => Self::AuthExpired,
            Err(ApiError::BadRequest { .. }) => Self::BadRequest,
            Err(e) => Self::ServerError(e.body().unwrap_or(TRANSFER_FAILED).to_string()),
        }
    }

    /// What the user sees for this outcome.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Success => Notice::success(SUCCESS_MESSAGE),
            Self::AuthExpired => Notice::error_with_reload(SESSION_EXPIRED),
            Self::BadRequest => Notice::error(MALFORMED_TRANSFER),
            Self::ServerError(message) => Notice::error(message.clone()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// A submission handed out by [`ConfirmationDialog::begin_submit`].
#[derive(Debug)]
pub struct PendingSubmit {
    request: NewTransaction,
    token: CancelToken,
    started_at: Timestamp,
}

impl PendingSubmit {
    /// The body to `POST /transaction`.
    pub fn request(&self) -> &NewTransaction {
        &self.request
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }
}

/// Emitted by [`ConfirmationDialog::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogEvent {
    /// The success message timed out; the owner should close the dialog.
    AutoClosed,
}

pub struct ConfirmationDialog {
    draft: TransactionDraft,
    password: String,
    loading: bool,
    error: Option<Notice>,
    success: Option<Notice>,
    dismiss_at: Option<Timestamp>,
    in_flight: Option<CancelToken>,
    clock: Arc<dyn Clock>,
    autoupdate: Autoupdate,
}

impl ConfirmationDialog {
    pub fn new(draft: TransactionDraft, clock: Arc<dyn Clock>, autoupdate: Autoupdate) -> Self {
        Self {
            draft,
            password: String::new(),
            loading: false,
            error: None,
            success: None,
            dismiss_at: None,
            in_flight: None,
            clock,
            autoupdate,
        }
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    /// "You try to send N sat. to paymail"
    pub fn summary(&self) -> String {
        format!(
            "You try to send {} sat. ({} BSV) to {}",
            self.draft.amount.as_u64(),
            bux_utils::format_sat_as_bsv(self.draft.amount.as_u64()),
            self.draft.recipient
        )
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    pub fn success(&self) -> Option<&Notice> {
        self.success.as_ref()
    }

    /// The banner to show: success wins over a stale error.
    pub fn notice(&self) -> Option<&Notice> {
        self.success.as_ref().or(self.error.as_ref())
    }

    /// When the success message will auto-close, if it is showing.
    pub fn dismiss_deadline(&self) -> Option<Timestamp> {
        self.dismiss_at
    }

    /// Time left until the auto-close, if one is scheduled.
    pub fn time_until_dismiss(&self) -> Option<Duration> {
        self.dismiss_at.map(|at| self.clock.now().until(at))
    }

    /// Validate and start a submission.
    ///
    /// Fails without producing a request when the password is empty, when a
    /// submission is already in flight, or when the draft already settled.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, ConfirmError> {
        if self.in_flight.is_some() {
            tracing::debug!("submit ignored: already in flight");
            return Err(ConfirmError::InFlight);
        }
        if self.success.is_some() {
            return Err(ConfirmError::Settled);
        }
        if !is_password_present(&self.password) {
            let err = ValidationError::MissingPassword;
            self.error = Some(Notice::error(err.to_string()));
            return Err(err.into());
        }

        self.error = None;
        self.loading = true;
        let token = CancelToken::new();
        self.in_flight = Some(token.clone());
        tracing::debug!(recipient = %self.draft.recipient, "submitting transaction");

        Ok(PendingSubmit {
            request: self.draft.clone().into_request(self.password.clone()),
            token,
            started_at: self.clock.now(),
        })
    }

    /// Apply the backend's answer to a submission.
    ///
    /// If the dialog was closed since [`begin_submit`](Self::begin_submit),
    /// the result is discarded and [`ConfirmError::Cancelled`] returned.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmit,
        response: Result<(), ApiError>,
    ) -> Result<TransactionResult, ConfirmError> {
        if pending.token.is_cancelled() {
            tracing::debug!("discarding result of cancelled submission");
            return Err(ConfirmError::Cancelled);
        }
        self.in_flight = None;
        self.loading = false;

        let outcome = TransactionResult::from_response(response);
        match &outcome {
            TransactionResult::Success => {
                let now = self.clock.now();
                self.success = Some(outcome.notice());
                self.dismiss_at = Some(now.add(AUTO_DISMISS_AFTER));
                self.autoupdate.stamp(now);
                tracing::info!(
                    recipient = %self.draft.recipient,
                    satoshis = self.draft.amount.as_u64(),
                    "transaction sent"
                );
            }
            failure => {
                tracing::warn!(?failure, "transaction not sent");
                self.error = Some(outcome.notice());
            }
        }
        Ok(outcome)
    }

    /// Submit against `backend`: one request, no retries.
    pub async fn submit(
        &mut self,
        backend: &dyn WalletBackend,
    ) -> Result<TransactionResult, ConfirmError> {
        let pending = self.begin_submit()?;
        let response = backend.send_transaction(pending.request()).await;
        self.finish_submit(pending, response)
    }

    /// Fire the auto-close if its deadline has passed.
    pub fn tick(&mut self) -> Option<DialogEvent> {
        let at = self.dismiss_at?;
        if self.clock.now() < at {
            return None;
        }
        self.dismiss_at = None;
        self.success = None;
        Some(DialogEvent::AutoClosed)
    }

    /// Tear the dialog down: cancel any outstanding submission and drop the
    /// password, banners, and pending auto-close.
    pub fn close(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.password.clear();
        self.loading = false;
        self.error = None;
        self.success = None;
        self.dismiss_at = None;
    }
}

impl Drop for ConfirmationDialog {
    fn drop(&mut self) {
        if let Some(token) = &self.in_flight {
            token.cancel();
        }
    }
}
