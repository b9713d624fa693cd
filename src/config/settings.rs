use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::{Client, Credentials, DEFAULT_BASE_URL};
use crate::errors::{OtsError, Result};

/// Client configuration, loaded from `ots.toml`.
///
/// Works without any config file: the base URL defaults to the public
/// API and credentials can come from the environment instead.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// API root, including the version prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account email.
    #[serde(default)]
    pub username: Option<String>,

    /// API token from the account page.
    #[serde(default)]
    pub token: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            token: None,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = "ots.toml";

    pub const ENV_USERNAME: &'static str = "OTS_EMAIL";
    pub const ENV_TOKEN: &'static str = "OTS_KEY";
    pub const ENV_BASE_URL: &'static str = "OTS_BASE_URL";

    /// Load settings from `<dir>/ots.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            OtsError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Overlay `OTS_EMAIL`, `OTS_KEY` and `OTS_BASE_URL` on top of the file
    /// values. Pass `|k| std::env::var(k).ok()` to read the process
    /// environment.
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup(Self::ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(token) = lookup(Self::ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(base_url) = lookup(Self::ENV_BASE_URL) {
            self.base_url = base_url;
        }
        self
    }

    /// Build a client from these settings.
    pub fn client(&self) -> Result<Client> {
        let username = self.username.as_deref().ok_or_else(|| {
            OtsError::Config(format!("No username configured (set {})", Self::ENV_USERNAME))
        })?;
        let token = self.token.as_deref().ok_or_else(|| {
            OtsError::Config(format!("No API token configured (set {})", Self::ENV_TOKEN))
        })?;

        Ok(Client::with_base_url(
            Credentials::new(username, token),
            self.base_url.clone(),
        ))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
