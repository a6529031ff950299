//! The "send money" form.
//!
//! Collects recipient and amount, turns them into a [`TransactionDraft`], and
//! owns the [`ConfirmationDialog`] for that draft until it settles or is
//! cancelled.

use bux_types::{Clock, Paymail, TransactionDraft, ValidationError};
use std::sync::Arc;
use std::time::Duration;

use crate::autoupdate::Autoupdate;
use crate::confirmation::{ConfirmationDialog, DialogEvent};
use crate::draft::{DraftLifecycle, DraftState};
use crate::error::DraftError;
use crate::validation::{is_valid_paymail, AmountField, MAX_TRANSACTION_SATOSHIS};

/// Emitted by [`TransferForm::tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferEvent {
    /// The draft was sent and the dialog closed itself.
    Settled(TransactionDraft),
}

pub struct TransferForm {
    paymail: String,
    amount: AmountField,
    loading: bool,
    error: Option<String>,
    lifecycle: DraftLifecycle,
    dialog: Option<ConfirmationDialog>,
    clock: Arc<dyn Clock>,
    autoupdate: Autoupdate,
}

impl TransferForm {
    pub fn new(clock: Arc<dyn Clock>, autoupdate: Autoupdate) -> Self {
        Self {
            paymail: String::new(),
            amount: AmountField::new(MAX_TRANSACTION_SATOSHIS),
            loading: false,
            error: None,
            lifecycle: DraftLifecycle::new(),
            dialog: None,
            clock,
            autoupdate,
        }
    }

    pub fn paymail(&self) -> &str {
        &self.paymail
    }

    pub fn set_paymail(&mut self, paymail: impl Into<String>) {
        self.paymail = paymail.into();
    }

    /// Amount field text; empty when unset.
    pub fn amount(&self) -> String {
        self.amount.text()
    }

    /// Apply an amount edit. Invalid edits are discarded silently.
    pub fn edit_amount(&mut self, input: &str) -> bool {
        self.amount.edit(input)
    }

    /// Inline form error (paymail validation).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> &DraftState {
        self.lifecycle.state()
    }

    pub fn draft(&self) -> Option<&TransactionDraft> {
        self.lifecycle.draft()
    }

    /// "Send" is enabled once both fields have something in them.
    pub fn can_send(&self) -> bool {
        !self.lifecycle.is_pending() && !self.paymail.is_empty() && !self.amount.is_empty()
    }

    /// "Clear" is enabled once either field has something in it.
    pub fn can_clear(&self) -> bool {
        !self.lifecycle.is_pending() && (!self.paymail.is_empty() || !self.amount.is_empty())
    }

    /// Empty both fields and the error.
    pub fn clear(&mut self) -> Result<(), DraftError> {
        if self.lifecycle.is_pending() {
            return Err(DraftError::Pending);
        }
        self.paymail.clear();
        self.amount.clear();
        self.error = None;
        self.lifecycle.reset();
        Ok(())
    }

    /// Turn the form into a draft.
    ///
    /// An invalid paymail sets the inline error and leaves the state alone.
    pub fn submit(&mut self) -> Result<TransactionDraft, DraftError> {
        if self.lifecycle.is_pending() {
            return Err(DraftError::Pending);
        }
        let recipient = match Paymail::parse(self.paymail.as_str()) {
            Ok(p) => p,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err.into());
            }
        };
        let amount = self
            .amount
            .value()
            .ok_or(DraftError::Validation(ValidationError::MissingAmount))?;

        let draft = TransactionDraft::new(recipient, amount);
        self.lifecycle.create(draft.clone())?;
        self.error = None;
        self.loading = true;
        Ok(draft)
    }

    /// Open the confirmation dialog for the pending draft.
    pub fn open_confirmation(&mut self) -> Result<&mut ConfirmationDialog, DraftError> {
        let draft = self.lifecycle.open()?;
        let dialog = ConfirmationDialog::new(draft, self.clock.clone(), self.autoupdate.clone());
        Ok(self.dialog.insert(dialog))
    }

    pub fn dialog(&self) -> Option<&ConfirmationDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut ConfirmationDialog> {
        self.dialog.as_mut()
    }

    /// The user backed out of the confirmation.
    ///
    /// Keeps the form fields so the user can adjust and resend.
    pub fn cancel_confirmation(&mut self) -> Result<TransactionDraft, DraftError> {
        let draft = self.lifecycle.cancel()?;
        if let Some(mut dialog) = self.dialog.take() {
            dialog.close();
        }
        self.loading = false;
        if is_valid_paymail(&self.paymail) {
            self.error = None;
        }
        Ok(draft)
    }

    /// Drive the dialog's auto-close; settles the draft when it fires.
    pub fn tick(&mut self) -> Option<TransferEvent> {
        let event = self.dialog.as_mut()?.tick()?;
        match event {
            DialogEvent::AutoClosed => self.settle().map(TransferEvent::Settled),
        }
    }

    /// Time left until a pending auto-close.
    pub fn time_until_dismiss(&self) -> Option<Duration> {
        self.dialog.as_ref()?.time_until_dismiss()
    }

    fn settle(&mut self) -> Option<TransactionDraft> {
        let draft = match self.lifecycle.settle() {
            Ok(d) => d,
            Err(err) => {
                tracing::warn!(%err, "auto-close without a confirming draft");
                return None;
            }
        };
        if let Some(mut dialog) = self.dialog.take() {
            dialog.close();
        }
        self.paymail.clear();
        self.amount.clear();
        self.loading = false;
        self.error = None;
        Some(draft)
    }
}
