//! Fundamental types for the BUX wallet client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! paymail addresses, satoshi amounts, transaction drafts and wire bodies,
//! contacts, the logged-in user, and timestamps.

pub mod amount;
pub mod contact;
pub mod error;
pub mod paymail;
pub mod time;
pub mod transaction;
pub mod user;

pub use amount::{is_valid_amount, Satoshis, MAX_TRANSACTION_SATOSHIS};
pub use contact::{Contact, ContactStatus};
pub use error::ValidationError;
pub use paymail::{is_valid_paymail, Paymail};
pub use time::{Clock, SystemClock, Timestamp};
pub use transaction::{NewTransaction, Transaction, TransactionDraft};
pub use user::LoggedInUser;
