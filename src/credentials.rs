//! API key storage.
//!
//! The key lives in a single-key JSON file (`credentials.json`) under the
//! app config directory. A missing or unreadable file means "no key
//! configured" and triggers the interactive prompt upstream; it is never an
//! error at this layer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Environment variable that takes precedence over the credential file
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";

/// An OpenRouter API key.
///
/// The wrapped value is opaque; `Debug` redacts it so the key cannot leak
/// through error chains or debug logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// On-disk shape of the credential file
#[derive(Serialize, Deserialize)]
struct CredentialFile {
    api_key: Option<String>,
}

/// Loads and persists the API key.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: Option<PathBuf>,
}

impl CredentialStore {
    /// Store backed by the default location
    /// (`<config_dir>/critique/credentials.json`).
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join("critique").join("credentials.json")),
        }
    }

    /// Store backed by a specific file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Read the key. The `OPENROUTER_API_KEY` environment variable wins over
    /// the file; a missing, malformed, or empty entry degrades to `None`.
    pub fn load(&self) -> Option<Credential> {
        if let Some(key) = Self::from_env() {
            return Some(key);
        }
        self.load_from_file()
    }

    /// Read the key from the file only, ignoring the environment.
    pub fn load_from_file(&self) -> Option<Credential> {
        let path = self.path.as_ref()?;
        let contents = std::fs::read_to_string(path).ok()?;
        let parsed: CredentialFile = serde_json::from_str(&contents).ok()?;
        parsed
            .api_key
            .filter(|k| !k.trim().is_empty())
            .map(Credential::new)
    }

    /// Write the key, overwriting any prior content.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("no config directory available for credential storage")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let body = serde_json::to_string_pretty(&CredentialFile {
            api_key: Some(credential.as_str().to_string()),
        })?;
        std::fs::write(path, body)
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(())
    }

    /// Path the store reads and writes, if one could be resolved.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    fn from_env() -> Option<Credential> {
        env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .map(Credential::new)
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
