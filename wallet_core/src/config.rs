//! Startup configuration.
//!
//! Two JSON documents: `config.default.json` (required) and
//! `env-config.json` (optional). Keys in the override replace keys of the
//! same name in the default; override keys the default does not have are
//! ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.json";
pub const OVERRIDE_CONFIG_FILE: &str = "env-config.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    /// Base URL of the wallet backend.
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_transaction_page_size")]
    pub transaction_page_size: u32,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_transaction_page_size() -> u32 {
    bux_api::pagination::DEFAULT_PAGE_SIZE
}

/// Load and merge the two config files from `dir`.
pub fn load_config(dir: &Path) -> Result<WalletConfig, ConfigError> {
    load_config_files(
        &dir.join(DEFAULT_CONFIG_FILE),
        &dir.join(OVERRIDE_CONFIG_FILE),
    )
}

/// Load `default_path`, apply `override_path` if it exists and parses.
pub fn load_config_files(
    default_path: &Path,
    override_path: &Path,
) -> Result<WalletConfig, ConfigError> {
    let defaults = read_object(default_path).map_err(|reason| ConfigError::MissingDefault {
        path: default_path.to_path_buf(),
        reason,
    })?;
    let Some(defaults) = defaults else {
        return Err(ConfigError::NotAnObject(default_path.to_path_buf()));
    };

    let merged = match read_object(override_path) {
        Ok(Some(overrides)) => {
            tracing::info!("Using merged (default with override) config...");
            merge_config(defaults, overrides)
        }
        Ok(None) | Err(_) => {
            tracing::info!(
                "File {} not specified or wrong format (requires json). Using default config...",
                override_path.display()
            );
            defaults
        }
    };

    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Replace values in `defaults` with same-named values from `overrides`.
pub fn merge_config(mut defaults: Map<String, Value>, overrides: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overrides {
        match defaults.get_mut(&key) {
            Some(slot) => *slot = value,
            None => tracing::debug!(key = %key, "ignoring override key absent from default config"),
        }
    }
    defaults
}

/// `Ok(Some)` for a JSON object, `Ok(None)` for other JSON, `Err` if the
/// file is unreadable or not JSON.
fn read_object(path: &Path) -> Result<Option<Map<String, Value>>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    match serde_json::from_str::<Value>(&text).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn default_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DEFAULT_CONFIG_FILE, r#"{"apiUrl":"http://localhost:3003"}"#);
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg.api_url, "http://localhost:3003");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.transaction_page_size, 10);
    }

    #[test]
    fn override_replaces_known_keys_only() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DEFAULT_CONFIG_FILE,
            r#"{"apiUrl":"http://localhost:3003","transactionPageSize":10}"#,
        );
        write(
            dir.path(),
            OVERRIDE_CONFIG_FILE,
            r#"{"apiUrl":"https://wallet.example.com","requestTimeoutSecs":5,"transactionPageSize":50}"#,
        );
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg.api_url, "https://wallet.example.com");
        assert_eq!(cfg.transaction_page_size, 50);
        // not in the default document, so the override is ignored
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn broken_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DEFAULT_CONFIG_FILE, r#"{"apiUrl":"http://a"}"#);
        write(dir.path(), OVERRIDE_CONFIG_FILE, "apiUrl = nope");
        assert_eq!(load_config(dir.path()).unwrap().api_url, "http://a");
    }

    #[test]
    fn missing_default_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), OVERRIDE_CONFIG_FILE, r#"{"apiUrl":"http://a"}"#);
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::MissingDefault { .. })
        ));
    }

    #[test]
    fn default_must_be_object_with_api_url() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DEFAULT_CONFIG_FILE, "[1,2]");
        assert!(matches!(load_config(dir.path()), Err(ConfigError::NotAnObject(_))));
        write(dir.path(), DEFAULT_CONFIG_FILE, "{}");
        assert!(matches!(load_config(dir.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn merge_ignores_unknown_keys() {
        let defaults = json!({ "a": 1, "b": 2 }).as_object().cloned().unwrap();
        let overrides = json!({ "b": 3, "c": 4 }).as_object().cloned().unwrap();
        let merged = merge_config(defaults, overrides);
        assert_eq!(Value::Object(merged), json!({ "a": 1, "b": 3 }));
    }
}
