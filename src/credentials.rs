//! Credential storage in the operating system keychain.
//!
//! The aaio API key, shop ID and secret key can be kept in the platform
//! store (macOS Keychain, Windows Credential Manager, Secret Service on
//! Linux) instead of the environment. [`Keychain::store_config`] saves the
//! credentials of a loaded [`AaioConfig`], and [`populate_env_from_keychain`]
//! copies stored values back into the `AAIO_*` variables so
//! [`crate::config::fetch_config`] picks them up.

use keyring::credential::{CredentialBuilderApi, CredentialPersistence};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::config::AaioConfig;
use crate::{AaioError, Result};

/// Keychain service name used for all stored credentials.
const SERVICE: &str = "aaio";

/// Credentials managed by this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialKey {
    ApiKey,
    ShopId,
    SecretKey,
}

impl CredentialKey {
    /// All credential keys.
    pub const ALL: [CredentialKey; 3] = [Self::ApiKey, Self::ShopId, Self::SecretKey];

    /// Returns the keychain entry identifier.
    pub fn keyring_id(self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::ShopId => "shop_id",
            Self::SecretKey => "secret_key",
        }
    }

    /// Returns the environment variable read by [`crate::config::fetch_config`].
    pub fn env_var(self) -> &'static str {
        match self {
            Self::ApiKey => "AAIO_API_KEY",
            Self::ShopId => "AAIO_SHOP_ID",
            Self::SecretKey => "AAIO_SECRET_KEY",
        }
    }

    /// Returns this credential's value in `config`, if set.
    pub fn value_in(self, config: &AaioConfig) -> Option<&str> {
        match self {
            Self::ApiKey => config.api_key.as_deref(),
            Self::ShopId => config.shop_id.as_deref(),
            Self::SecretKey => config.secret_key.as_ref().map(|s| s.as_str()),
        }
    }
}

/// A set of aaio credentials under one keychain service name.
#[derive(Debug, Clone)]
pub struct Keychain {
    service: String,
}

impl Default for Keychain {
    fn default() -> Self {
        Self::new(SERVICE)
    }
}

impl Keychain {
    /// Creates a keychain handle for `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Whether the compiled-in credential store outlives the process.
    ///
    /// False only on platforms without a native store, where keyring falls
    /// back to its in-memory mock.
    pub fn is_persistent() -> bool {
        matches!(
            keyring::default::default_credential_builder().persistence(),
            CredentialPersistence::UntilDelete | CredentialPersistence::UntilReboot
        )
    }

    fn entry(&self, key: CredentialKey) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key.keyring_id())
            .map_err(|e| AaioError::Config(format!("keychain entry {}: {e}", key.keyring_id())))
    }

    /// Loads a credential, returning `None` if it is not stored.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the keychain cannot be read.
    pub fn load(&self, key: CredentialKey) -> Result<Option<Zeroizing<String>>> {
        match self.entry(key)?.get_password() {
            Ok(password) => Ok(Some(Zeroizing::new(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AaioError::Config(format!(
                "failed to read {} from keychain: {e}",
                key.keyring_id()
            ))),
        }
    }

    /// Saves a credential.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if `value` is empty, if no persistent
    /// store is available, or if the write fails.
    pub fn save(&self, key: CredentialKey, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(AaioError::Config(format!(
                "refusing to store an empty {}",
                key.keyring_id()
            )));
        }
        if !Self::is_persistent() {
            return Err(AaioError::Config(
                "no persistent keychain is available on this platform".to_string(),
            ));
        }

        self.entry(key)?.set_password(value).map_err(|e| {
            AaioError::Config(format!("failed to save {} to keychain: {e}", key.keyring_id()))
        })
    }

    /// Deletes a credential, returning whether one was stored.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the keychain cannot be written.
    pub fn delete(&self, key: CredentialKey) -> Result<bool> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(AaioError::Config(format!(
                "failed to delete {} from keychain: {e}",
                key.keyring_id()
            ))),
        }
    }

    /// Saves every credential set in `config` and returns the keys stored.
    ///
    /// # Errors
    ///
    /// Stops at the first failing write, see [`Self::save`].
    pub fn store_config(&self, config: &AaioConfig) -> Result<Vec<CredentialKey>> {
        let mut stored = Vec::new();
        for key in CredentialKey::ALL {
            if let Some(value) = key.value_in(config) {
                self.save(key, value)?;
                info!(key = key.keyring_id(), "stored credential in keychain");
                stored.push(key);
            }
        }
        Ok(stored)
    }

    /// Deletes every stored credential and returns the keys removed.
    ///
    /// # Errors
    ///
    /// Stops at the first failing delete, see [`Self::delete`].
    pub fn clear(&self) -> Result<Vec<CredentialKey>> {
        let mut removed = Vec::new();
        for key in CredentialKey::ALL {
            if self.delete(key)? {
                removed.push(key);
            }
        }
        Ok(removed)
    }

    /// Sets each unset `AAIO_*` credential variable from the keychain.
    ///
    /// Read failures are logged and skipped.
    pub fn populate_env(&self) {
        for key in CredentialKey::ALL {
            if std::env::var(key.env_var()).is_ok_and(|v| !v.is_empty()) {
                continue;
            }
            match self.load(key) {
                Ok(Some(value)) => {
                    debug!(key = key.env_var(), "loaded credential from keychain");
                    // SAFETY: single-threaded at this point (before tokio runtime starts tasks)
                    unsafe {
                        std::env::set_var(key.env_var(), value.as_str());
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(key = key.keyring_id(), error = %e, "skipping keychain entry"),
            }
        }
    }
}

/// Populates `AAIO_*` variables from the default keychain service.
///
/// Call this at startup, before the tokio runtime spawns tasks and before
/// [`crate::config::fetch_config`].
pub fn populate_env_from_keychain() {
    Keychain::default().populate_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_match_config_loader() {
        let vars: Vec<_> = CredentialKey::ALL.iter().map(|k| k.env_var()).collect();
        assert_eq!(vars, ["AAIO_API_KEY", "AAIO_SHOP_ID", "AAIO_SECRET_KEY"]);
    }

    #[test]
    fn keyring_ids_are_distinct() {
        let ids: std::collections::HashSet<_> =
            CredentialKey::ALL.iter().map(|k| k.keyring_id()).collect();
        assert_eq!(ids.len(), CredentialKey::ALL.len());
    }

    #[test]
    fn value_in_reads_matching_config_field() {
        let config = AaioConfig::new("key-1")
            .with_shop_id("shop-1")
            .with_secret_key("secret-1");
        assert_eq!(CredentialKey::ApiKey.value_in(&config), Some("key-1"));
        assert_eq!(CredentialKey::ShopId.value_in(&config), Some("shop-1"));
        assert_eq!(CredentialKey::SecretKey.value_in(&config), Some("secret-1"));

        let empty = AaioConfig::default();
        assert!(CredentialKey::ALL.iter().all(|k| k.value_in(&empty).is_none()));
    }

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    #[test]
    fn platform_store_is_persistent() {
        assert!(Keychain::is_persistent());
    }

    #[test]
    fn save_rejects_empty_value() {
        let err = Keychain::new("aaio-test")
            .save(CredentialKey::ShopId, "")
            .unwrap_err();
        assert!(matches!(err, AaioError::Config(ref msg) if msg.contains("shop_id")));
    }

    #[test]
    fn store_config_without_credentials_stores_nothing() {
        let stored = Keychain::new("aaio-test")
            .store_config(&AaioConfig::default())
            .unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    #[ignore = "needs an unlocked OS keychain"]
    fn saved_credential_is_loaded_back() {
        let keychain = Keychain::new(format!("aaio-test-{}", std::process::id()));

        keychain.save(CredentialKey::ShopId, "shop-roundtrip").unwrap();
        let loaded = keychain.load(CredentialKey::ShopId).unwrap();
        assert_eq!(loaded.as_deref().map(String::as_str), Some("shop-roundtrip"));

        assert_eq!(keychain.clear().unwrap(), [CredentialKey::ShopId]);
        assert!(keychain.load(CredentialKey::ShopId).unwrap().is_none());
    }
}
