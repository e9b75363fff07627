//! Browser settings persisted in localStorage.
//!
//! Stored as one JSON object under [`SETTINGS_KEY`]. Missing or unreadable
//! entries fall back to the compiled-in defaults, field by field.

use ndnfs_core::{ClientConfig, Name};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GATEWAY_URL, DEFAULT_PREFIX, INTEREST_LIFETIME_MS, SETTINGS_KEY};
use crate::core::error::StorageError;
use crate::utils::dom;

/// User-adjustable browsing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Last root prefix submitted in the prefix bar
    pub prefix: String,
    /// Gateway base URL
    pub gateway_url: String,
    pub interest_lifetime_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            interest_lifetime_ms: INTEREST_LIFETIME_MS,
        }
    }
}

impl BrowserSettings {
    /// Parse stored JSON, falling back to defaults when it is unusable.
    ///
    /// A stored prefix that is not a valid name is replaced by the default.
    pub fn from_json(json: &str) -> Self {
        let mut settings: Self = match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("ignoring stored settings: {}", err);
                return Self::default();
            }
        };
        if settings.prefix.parse::<Name>().is_err() {
            log::warn!("ignoring stored prefix {:?}", settings.prefix);
            settings.prefix = DEFAULT_PREFIX.to_string();
        }
        settings
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|_| StorageError::SerializationFailed)
    }

    /// Request client configuration derived from these settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default().with_lifetime_ms(self.interest_lifetime_ms)
    }

    /// Load settings from localStorage, or defaults.
    pub fn load() -> Self {
        dom::local_storage()
            .and_then(|storage| storage.get_item(SETTINGS_KEY).ok().flatten())
            .map(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    /// Save settings to localStorage.
    pub fn save(&self) -> Result<(), StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
        storage
            .set_item(SETTINGS_KEY, &self.to_json()?)
            .map_err(|_| StorageError::SaveFailed)
    }

    /// Remember `prefix` as the last browsed root.
    ///
    /// Text that does not parse as a name is not stored.
    pub fn remember_prefix(&mut self, prefix: &str) -> Result<(), StorageError> {
        if self.prefix == prefix {
            return Ok(());
        }
        if let Err(err) = prefix.parse::<Name>() {
            log::debug!("not remembering prefix {:?}: {}", prefix, err);
            return Ok(());
        }
        self.prefix = prefix.to_string();
        self.save()
    }
}
