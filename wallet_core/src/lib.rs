//! Wallet client workflows for BUX.
//!
//! Each workflow is a plain state machine driven by user events and backend
//! results; none of them render anything. Provides:
//! - Form validation and the transfer form
//! - The transaction draft lifecycle
//! - Password-gated confirmation with timed auto-close
//! - Contact acceptance and verification
//! - Session bootstrap and transaction history
//! - The notification surface and the autoupdate signal
//! - Startup config merging

pub mod autoupdate;
pub mod cancel;
pub mod config;
pub mod confirmation;
pub mod contacts;
pub mod draft;
pub mod error;
pub mod history;
pub mod notification;
pub mod session;
pub mod transfer;
pub mod validation;

pub use autoupdate::{Autoupdate, AutoupdateSubscriber};
pub use cancel::CancelToken;
pub use config::{load_config, WalletConfig};
pub use confirmation::{ConfirmationDialog, DialogEvent, PendingSubmit, TransactionResult};
pub use contacts::{ContactAction, ContactsBoard, VerificationPrompt};
pub use draft::{DraftLifecycle, DraftState};
pub use error::{ConfigError, ConfirmError, ContactError, DraftError};
pub use history::TransactionHistory;
pub use notification::{Channel, Notice, NoticeLevel, NotificationSurface};
pub use session::{Session, SessionState};
pub use transfer::{TransferEvent, TransferForm};
