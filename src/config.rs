//! Workspace settings persisted next to the saved résumés.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;
use crate::storage::KeyValueStore;
use crate::theme::Theme;

/// Storage key holding the JSON-encoded [`Settings`].
pub const SETTINGS_KEY: &str = "coverLetterSettings";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Sender block printed at the top of the exported letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SenderDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Default for SenderDetails {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            email: "your.email@example.com".to_string(),
            phone: "Your Phone Number".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Base URL of the generation service, without the endpoint path.
    pub api_base_url: String,
    pub theme: Theme,
    pub sender: SenderDetails,
    /// `EnvFilter` directive handed to [`crate::logging::init`].
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            theme: Theme::System,
            sender: SenderDetails::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `store`. Anything missing or unreadable falls
    /// back to the defaults.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let raw = match store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("Failed to read settings, using defaults: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&raw) {
            Ok(mut settings) => {
                if settings.api_base_url.trim().is_empty() {
                    settings.api_base_url = DEFAULT_API_BASE_URL.to_string();
                }
                settings
            }
            Err(e) => {
                warn!("Stored settings are corrupt, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), AppError> {
        let json = serde_json::to_string(self).map_err(|e| AppError::Storage(e.to_string()))?;
        store.set(SETTINGS_KEY, &json)?;
        info!("Saved settings (api_base_url = {})", self.api_base_url);
        Ok(())
    }

    /// Forget the stored settings and return the defaults.
    pub fn reset(store: &impl KeyValueStore) -> Result<Self, AppError> {
        store.remove(SETTINGS_KEY)?;
        info!("Settings reset to defaults");
        Ok(Self::default())
    }
}
