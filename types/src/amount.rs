//! Satoshi amounts and the transfer amount bounds.
//!
//! Amounts are integral satoshi counts; there is no fractional unit on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Largest amount the transfer form accepts, in satoshis.
pub const MAX_TRANSACTION_SATOSHIS: u64 = 999_999_999_999;

/// An amount in satoshis, the smallest unit of the currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Satoshis(u64);

impl Satoshis {
    pub const ZERO: Self = Self(0);

    pub fn new(sat: u64) -> Self {
        Self(sat)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parse a transfer amount: a positive integer no greater than `max`.
    pub fn parse(input: &str, max: u64) -> Result<Self, ValidationError> {
        match input.parse::<u64>() {
            Ok(sat) if sat > 0 && sat <= max => Ok(Self(sat)),
            _ => Err(ValidationError::InvalidAmount { max }),
        }
    }
}

impl fmt::Display for Satoshis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sat", self.0)
    }
}

/// Whether `input` is a positive integral satoshi amount no greater than `max`.
pub fn is_valid_amount(input: &str, max: u64) -> bool {
    Satoshis::parse(input, max).is_ok()
}
