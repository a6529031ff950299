//! Client-side form validation.
//!
//! Pure checks, no network calls. Failed amount edits are discarded rather
//! than reported.

use bux_types::Satoshis;

pub use bux_types::{is_valid_amount, is_valid_paymail, MAX_TRANSACTION_SATOSHIS};

/// Non-empty check only; password rules are enforced by the backend.
pub fn is_password_present(input: &str) -> bool {
    !input.is_empty()
}

/// The transfer form's amount input.
///
/// Holds either nothing or the last valid amount typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountField {
    value: Option<Satoshis>,
    max: u64,
}

impl AmountField {
    pub fn new(max: u64) -> Self {
        Self { value: None, max }
    }

    /// Apply an edit. Returns whether the field changed.
    ///
    /// Empty input clears the field. Input that is not a positive integer
    /// within bounds is discarded and the previous value kept.
    pub fn edit(&mut self, input: &str) -> bool {
        if input.is_empty() {
            let changed = self.value.is_some();
            self.value = None;
            return changed;
        }
        match Satoshis::parse(input, self.max) {
            Ok(sat) => {
                let changed = self.value != Some(sat);
                self.value = Some(sat);
                changed
            }
            Err(_) => {
                tracing::trace!(input, "discarding invalid amount edit");
                false
            }
        }
    }

    pub fn value(&self) -> Option<Satoshis> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    /// The field's text as displayed.
    pub fn text(&self) -> String {
        self.value.map(|s| s.as_u64().to_string()).unwrap_or_default()
    }
}

impl Default for AmountField {
    fn default() -> Self {
        Self::new(MAX_TRANSACTION_SATOSHIS)
    }
}
