//! # Settings Store
//!
//! Persists the operator's settings (the billing provider API key) as
//! `settings.json` in the app's config directory. Simple pass-through for
//! the shell; loading/saving indicators are the shell's concern.
//!
//! ## File Layout
//! ```text
//! {config_dir}/Billing/settings.json
//!   macOS   → ~/Library/Application Support/Billing/settings.json
//!   Linux   → ~/.config/Billing/settings.json
//!   Windows → %AppData%\Billing\settings.json
//! ```
//!
//! A missing file is not an error: `load` returns the defaults so the
//! first run works before any key has been saved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// App subdirectory under the OS config dir.
const APP_DIR: &str = "Billing";

/// Settings file name.
const SETTINGS_FILE: &str = "settings.json";

// =============================================================================
// Errors
// =============================================================================

/// Failures from the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The OS config directory could not be resolved.
    #[error("could not resolve the OS config directory")]
    NoConfigDir,

    /// Reading or writing the settings file failed.
    #[error("settings file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The settings file holds invalid JSON.
    #[error("settings file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

// =============================================================================
// Settings
// =============================================================================

/// The persisted settings. Can grow more fields as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Billing provider API key.
    pub api_key: String,
}

// =============================================================================
// Store
// =============================================================================

/// Reads and writes `settings.json` under a base directory.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// A store rooted at an explicit directory. Tests point this at a
    /// scratch dir.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SettingsStore { dir: dir.into() }
    }

    /// A store rooted at the OS config directory.
    pub fn in_os_config_dir() -> Result<Self, SettingsError> {
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(SettingsStore::new(base.join(APP_DIR)))
    }

    /// Path of the settings file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Loads the settings, returning defaults when no file exists yet.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file yet, using defaults");
                return Ok(Settings::default());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    /// Saves the settings, creating the directory on first use.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(settings)?;
        write_private(&self.path(), &json)?;
        debug!(path = %self.path().display(), "settings saved");
        Ok(())
    }
}

/// Writes the file owner-readable only where the platform supports it;
/// the API key is a secret.
fn write_private(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
