//! Paymail address type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// An email-shaped address identifying a wallet recipient.
///
/// Only constructible from input that passes [`is_valid_paymail`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Paymail(String);

impl Paymail {
    /// Parse and validate a paymail address.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let s = raw.into();
        if is_valid_paymail(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidPaymail)
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before `@`.
    pub fn alias(&self) -> &str {
        self.0.split_once('@').map(|(alias, _)| alias).unwrap_or(&self.0)
    }

    /// The part after `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or("")
    }
}

impl fmt::Display for Paymail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Paymail {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Paymail> for String {
    fn from(p: Paymail) -> Self {
        p.0
    }
}

/// Whether `input` is shaped like `local@domain.tld`.
///
/// Accepts `[A-Za-z0-9._%+-]+ @ [A-Za-z0-9.-]+ . [A-Za-z]{2,}` over the whole
/// string. No network lookup is performed.
pub fn is_valid_paymail(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host.chars().all(is_host_char)
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_shapes() {
        assert!(is_valid_paymail("alice@bux.com"));
        assert!(is_valid_paymail("first.last+tag@wallet.example.org"));
        assert!(is_valid_paymail("a_b%c-d@sub-domain.io"));
    }

    #[test]
    fn rejects_malformed() {
        for bad in [
            "",
            "alice",
            "@bux.com",
            "alice@",
            "alice@bux",
            "alice@bux.c",
            "alice@.com",
            "alice@@bux.com",
            "ali ce@bux.com",
            "alice@bux.com ",
            "alice@bux.c0m",
        ] {
            assert!(!is_valid_paymail(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn parse_splits_alias_and_domain() {
        let p = Paymail::parse("alice@bux.com").unwrap();
        assert_eq!(p.alias(), "alice");
        assert_eq!(p.domain(), "bux.com");
        assert_eq!(Paymail::parse("nope").unwrap_err(), ValidationError::InvalidPaymail);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<Paymail>("\"alice@bux.com\"").is_ok());
        assert!(serde_json::from_str::<Paymail>("\"alice\"").is_err());
    }
}
