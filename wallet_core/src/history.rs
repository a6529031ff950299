//! Transaction history view.
//!
//! Subscribes to the autoupdate signal and refetches when a transfer settles.

use bux_api::{ApiError, PaginationParams, WalletBackend};
use bux_types::Transaction;

use crate::autoupdate::{Autoupdate, AutoupdateSubscriber};
use crate::confirmation::SESSION_EXPIRED;
use crate::notification::Notice;
use crate::session::SOMETHING_WENT_WRONG;

pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from backend.";

pub struct TransactionHistory {
    page: PaginationParams,
    rows: Vec<Transaction>,
    loaded: bool,
    error: Option<Notice>,
    updates: AutoupdateSubscriber,
}

impl TransactionHistory {
    pub fn new(autoupdate: &Autoupdate, page_size: u32) -> Self {
        Self {
            page: PaginationParams::newest_first(1, page_size),
            rows: Vec::new(),
            loaded: false,
            error: None,
            updates: autoupdate.subscribe(),
        }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn page(&self) -> u32 {
        self.page.page
    }

    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// Never loaded, or a transfer settled since the last load.
    pub fn is_stale(&self) -> bool {
        !self.loaded || self.updates.has_update()
    }

    /// Jump to page `page` (1-based). Marks the view stale.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = PaginationParams::newest_first(page, self.page.page_size);
        self.loaded = false;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.next();
        self.loaded = false;
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.page.saturating_sub(1));
    }

    /// Fetch the current page.
    pub async fn refresh(&mut self, backend: &dyn WalletBackend) -> Result<&[Transaction], ApiError> {
        self.updates.mark_seen();
        match backend.transactions(&self.page).await {
            Ok(rows) => {
                tracing::debug!(page = self.page.page, count = rows.len(), "history loaded");
                self.rows = rows;
                self.loaded = true;
                self.error = None;
                Ok(&self.rows)
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load history");
                self.error = Some(Self::notice_for(&err));
                // the stamp was consumed above; stay stale until a load succeeds
                self.loaded = false;
                Err(err)
            }
        }
    }

    /// Refetch only if stale. Returns whether a fetch happened.
    pub async fn refresh_if_stale(&mut self, backend: &dyn WalletBackend) -> Result<bool, ApiError> {
        if !self.is_stale() {
            return Ok(false);
        }
        self.refresh(backend).await?;
        Ok(true)
    }

    /// Fetch the full record for one transaction.
    pub async fn details(
        &self,
        backend: &dyn WalletBackend,
        id: &str,
    ) -> Result<serde_json::Value, ApiError> {
        backend.transaction_details(id).await
    }

    fn notice_for(err: &ApiError) -> Notice {
        match err {
            ApiError::Unauthorized { .. } => Notice::error_with_reload(SESSION_EXPIRED),
            ApiError::MalformedResponse(_) => Notice::error_with_reload(UNEXPECTED_RESPONSE),
            other => Notice::error_with_reload(other.body().unwrap_or(SOMETHING_WENT_WRONG)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bux_nullables::{BackendCall, NullBackend};
    use bux_types::Timestamp;

    fn row(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            direction: "outgoing".into(),
            total_value: 100,
            fee: 1,
            status: "complete".into(),
            created_at: "2023-06-01T00:00:00Z".into(),
            sender: None,
            receiver: Some("bob@bux.com".into()),
        }
    }

    #[tokio::test]
    async fn refetches_only_after_autoupdate() {
        let backend = NullBackend::new();
        backend.set_transactions(Ok(vec![row("a")]));
        let autoupdate = Autoupdate::new();
        let mut history = TransactionHistory::new(&autoupdate, 10);

        assert!(history.refresh_if_stale(&backend).await.unwrap());
        assert_eq!(history.rows().len(), 1);
        assert!(!history.refresh_if_stale(&backend).await.unwrap());
        assert_eq!(backend.call_count(), 1);

        backend.set_transactions(Ok(vec![row("b"), row("a")]));
        autoupdate.stamp(Timestamp::from_millis(5));
        assert!(history.is_stale());
        assert!(history.refresh_if_stale(&backend).await.unwrap());
        assert_eq!(history.rows()[0].id, "b");
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn failed_refetch_after_stamp_stays_stale() {
        let backend = NullBackend::new();
        backend.set_transactions(Ok(vec![row("a")]));
        let autoupdate = Autoupdate::new();
        let mut history = TransactionHistory::new(&autoupdate, 10);
        history.refresh(&backend).await.unwrap();

        autoupdate.stamp(Timestamp::from_millis(5));
        backend.set_transactions(Err(ApiError::from_status(503, None)));
        assert!(history.refresh_if_stale(&backend).await.is_err());
        assert!(history.is_stale());
        assert_eq!(history.rows()[0].id, "a");

        backend.set_transactions(Ok(vec![row("b"), row("a")]));
        assert!(history.refresh_if_stale(&backend).await.unwrap());
        assert_eq!(history.rows()[0].id, "b");
        assert!(!history.is_stale());
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn paging_changes_query() {
        let backend = NullBackend::new();
        let autoupdate = Autoupdate::new();
        let mut history = TransactionHistory::new(&autoupdate, 25);
        history.next_page();
        history.refresh(&backend).await.unwrap();
        history.prev_page();
        history.prev_page();
        history.refresh(&backend).await.unwrap();

        let pages: Vec<_> = backend
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                BackendCall::Transactions(p) => Some((p.page, p.page_size)),
                _ => None,
            })
            .collect();
        assert_eq!(pages, [(2, 25), (1, 25)]);
    }

    #[tokio::test]
    async fn malformed_payload_surfaces_as_error() {
        let backend = NullBackend::new();
        backend.set_transactions(Err(ApiError::MalformedResponse("a string".into())));
        let autoupdate = Autoupdate::new();
        let mut history = TransactionHistory::new(&autoupdate, 10);

        let err = history.refresh(&backend).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
        assert_eq!(history.error().unwrap().message, UNEXPECTED_RESPONSE);
        assert!(history.is_stale());
    }

    #[tokio::test]
    async fn details_by_id() {
        let backend = NullBackend::new();
        backend.set_transactions(Ok(vec![row("abc")]));
        let history = TransactionHistory::new(&Autoupdate::new(), 10);
        let detail = history.details(&backend, "abc").await.unwrap();
        assert_eq!(detail["id"], "abc");
        assert_eq!(detail["totalValue"], 100);
    }
}
