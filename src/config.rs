use std::{fs, path::PathBuf};

use fractic_server_error::ServerError;
use iso_currency::Currency;
use serde_derive::Deserialize;

use crate::errors::{InvalidIsoCurrencyCode, InvalidRon, ReadError};

/// Runtime settings. Every field has a default, so a RON document only needs
/// to name what it overrides:
///
/// ```ron
/// (
///     storage_dir: "/home/me/.spendwise",
///     request_timeout_secs: Some(30),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpendwiseConfig {
    /// Directory used by the file storage backend.
    pub storage_dir: PathBuf,
    pub gist_api_base: String,
    /// Name of the file holding the snapshot inside the remote document.
    pub gist_file_name: String,
    pub gist_description: String,
    pub user_agent: String,
    /// ISO 4217 code used when formatting amounts.
    pub currency: String,
    /// No timeout unless set; a hung request otherwise hangs the caller.
    pub request_timeout_secs: Option<u64>,
}

impl Default for SpendwiseConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".spendwise"),
            gist_api_base: "https://api.github.com".to_string(),
            gist_file_name: "spendwise_db.json".to_string(),
            gist_description: "SpendWise Cloud Database Backup".to_string(),
            user_agent: concat!("spendwise-ledger/", env!("CARGO_PKG_VERSION")).to_string(),
            currency: "INR".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl SpendwiseConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ServerError> {
        let config: Self =
            ron::from_str(s).map_err(|e| InvalidRon::with_debug("SpendwiseConfig", &e))?;
        config.currency()?;
        Ok(config)
    }

    pub fn from_ron_file<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        Self::from_ron_str(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }

    pub fn currency(&self) -> Result<Currency, ServerError> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&self.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpendwiseConfig::default();
        assert_eq!(config.gist_file_name, "spendwise_db.json");
        assert_eq!(config.gist_api_base, "https://api.github.com");
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.currency().unwrap(), Currency::INR);
    }

    #[test]
    fn test_partial_ron_overrides() {
        let config = SpendwiseConfig::from_ron_str(
            r#"(storage_dir: "/tmp/ledger", currency: "USD", request_timeout_secs: Some(30))"#,
        )
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/ledger"));
        assert_eq!(config.currency().unwrap(), Currency::USD);
        assert_eq!(config.request_timeout_secs, Some(30));
        assert_eq!(config.gist_file_name, "spendwise_db.json");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(SpendwiseConfig::from_ron_str("(storage_dir: 42)").is_err());
        assert!(SpendwiseConfig::from_ron_str(r#"(currency: "XYZ1")"#).is_err());
    }
}
