//! Client-side validation errors.

use thiserror::Error;

/// Validation failures resolved locally, before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid paymail address!")]
    InvalidPaymail,

    #[error("amount is required")]
    MissingAmount,

    #[error("amount must be a whole number of satoshis between 1 and {max}")]
    InvalidAmount { max: u64 },

    #[error("Password is required to confirm transaction.")]
    MissingPassword,
}
