//! Transaction draft lifecycle.
//!
//! `Idle → Drafted → Confirming → (Settled | Cancelled)`, and back to `Idle`
//! on reset. At most one draft is pending at a time: creating a draft while
//! one is drafted or confirming is refused.

use bux_types::TransactionDraft;

use crate::error::DraftError;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DraftState {
    #[default]
    Idle,
    Drafted(TransactionDraft),
    Confirming(TransactionDraft),
    Settled,
    Cancelled,
}

impl DraftState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drafted(_) => "drafted",
            Self::Confirming(_) => "confirming",
            Self::Settled => "settled",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Default)]
pub struct DraftLifecycle {
    state: DraftState,
}

impl DraftLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// The pending draft, if any.
    pub fn draft(&self) -> Option<&TransactionDraft> {
        match &self.state {
            DraftState::Drafted(d) | DraftState::Confirming(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.draft().is_some()
    }

    /// Start a new draft. A settled or cancelled draft is superseded.
    pub fn create(&mut self, draft: TransactionDraft) -> Result<(), DraftError> {
        if self.is_pending() {
            return Err(DraftError::Pending);
        }
        let from = self.state.name();
        self.transition(from, DraftState::Drafted(draft));
        Ok(())
    }

    /// `Drafted → Confirming`.
    pub fn open(&mut self) -> Result<TransactionDraft, DraftError> {
        match std::mem::take(&mut self.state) {
            DraftState::Drafted(d) => {
                self.transition("drafted", DraftState::Confirming(d.clone()));
                Ok(d)
            }
            other => Err(self.refuse(other, "open confirmation")),
        }
    }

    /// `Drafted | Confirming → Cancelled`.
    pub fn cancel(&mut self) -> Result<TransactionDraft, DraftError> {
        match std::mem::take(&mut self.state) {
            DraftState::Drafted(d) => {
                self.transition("drafted", DraftState::Cancelled);
                Ok(d)
            }
            DraftState::Confirming(d) => {
                self.transition("confirming", DraftState::Cancelled);
                Ok(d)
            }
            other => Err(self.refuse(other, "cancel")),
        }
    }

    /// `Confirming → Settled`.
    pub fn settle(&mut self) -> Result<TransactionDraft, DraftError> {
        match std::mem::take(&mut self.state) {
            DraftState::Confirming(d) => {
                self.transition("confirming", DraftState::Settled);
                Ok(d)
            }
            other => Err(self.refuse(other, "settle")),
        }
    }

    /// Any state → `Idle`.
    pub fn reset(&mut self) {
        let from = self.state.name();
        self.transition(from, DraftState::Idle);
    }

    fn transition(&mut self, from: &'static str, next: DraftState) {
        tracing::debug!(from, to = next.name(), "draft transition");
        self.state = next;
    }

    fn refuse(&mut self, previous: DraftState, action: &'static str) -> DraftError {
        let state = previous.name();
        self.state = previous;
        DraftError::InvalidTransition { action, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bux_types::{Paymail, Satoshis};

    fn draft(amount: u64) -> TransactionDraft {
        TransactionDraft::new(Paymail::parse("bob@bux.com").unwrap(), Satoshis::new(amount))
    }

    #[test]
    fn happy_path() {
        let mut lc = DraftLifecycle::new();
        lc.create(draft(10)).unwrap();
        assert_eq!(lc.state().name(), "drafted");
        assert_eq!(lc.open().unwrap(), draft(10));
        assert_eq!(lc.state(), &DraftState::Confirming(draft(10)));
        assert_eq!(lc.settle().unwrap(), draft(10));
        assert_eq!(lc.state(), &DraftState::Settled);
        assert!(lc.draft().is_none());
    }

    #[test]
    fn only_one_pending_draft() {
        let mut lc = DraftLifecycle::new();
        lc.create(draft(1)).unwrap();
        assert_eq!(lc.create(draft(2)).unwrap_err(), DraftError::Pending);
        lc.open().unwrap();
        assert_eq!(lc.create(draft(2)).unwrap_err(), DraftError::Pending);
        assert_eq!(lc.draft(), Some(&draft(1)));
    }

    #[test]
    fn new_draft_supersedes_finished_one() {
        let mut lc = DraftLifecycle::new();
        lc.create(draft(1)).unwrap();
        lc.cancel().unwrap();
        lc.create(draft(2)).unwrap();
        assert_eq!(lc.draft(), Some(&draft(2)));
    }

    #[test]
    fn illegal_transitions_leave_state_intact() {
        let mut lc = DraftLifecycle::new();
        assert_eq!(
            lc.settle().unwrap_err(),
            DraftError::InvalidTransition { action: "settle", state: "idle" }
        );
        lc.create(draft(5)).unwrap();
        assert!(lc.settle().is_err());
        assert_eq!(lc.state(), &DraftState::Drafted(draft(5)));
        assert!(lc.cancel().is_ok());
        assert!(lc.open().is_err());
        assert_eq!(lc.state(), &DraftState::Cancelled);
    }

    #[test]
    fn reset_from_anywhere() {
        let mut lc = DraftLifecycle::new();
        lc.create(draft(5)).unwrap();
        lc.open().unwrap();
        lc.reset();
        assert_eq!(lc.state(), &DraftState::Idle);
    }
}
