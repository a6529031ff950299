//! The "last update" signal.
//!
//! Views that depend on the transaction ledger subscribe; a settled transfer
//! stamps the signal with the settle time so subscribers know to refetch.

use bux_types::Timestamp;
use std::sync::Arc;
use tokio::sync::watch;

/// Publisher side of the signal. Cheap to clone; all clones share one value.
#[derive(Clone)]
pub struct Autoupdate {
    tx: Arc<watch::Sender<Option<Timestamp>>>,
}

impl Autoupdate {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Record that the ledger changed at `at`.
    pub fn stamp(&self, at: Timestamp) {
        tracing::debug!(%at, "autoupdate stamped");
        self.tx.send_replace(Some(at));
    }

    /// Most recent stamp, if any.
    pub fn last(&self) -> Option<Timestamp> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> AutoupdateSubscriber {
        AutoupdateSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for Autoupdate {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber side. Tracks which stamp it has already seen.
pub struct AutoupdateSubscriber {
    rx: watch::Receiver<Option<Timestamp>>,
}

impl AutoupdateSubscriber {
    /// Whether a stamp arrived since the last [`mark_seen`](Self::mark_seen).
    pub fn has_update(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Acknowledge the current stamp and return it.
    pub fn mark_seen(&mut self) -> Option<Timestamp> {
        *self.rx.borrow_and_update()
    }

    /// Wait for the next stamp.
    pub async fn changed(&mut self) -> Option<Timestamp> {
        self.rx.changed().await.ok()?;
        *self.rx.borrow_and_update()
    }
}
