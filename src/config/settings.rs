use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DISPLAY_NAME: &str = "OpenClaw";

const SETTINGS_DIR: &str = ".openclaw-send";
const SETTINGS_FILE: &str = "settings.toml";

/// User-edited client settings.
///
/// Loaded fresh at the start of every send and passed down as a snapshot;
/// nothing holds on to a copy between sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Relay endpoint. Empty turns every send into a no-op.
    pub webhook_url: String,
    pub auth_token: String,
    pub display_name: String,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        Ok(home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Read settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Validation(format!("serialize settings: {e}")))?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Copy with every field trimmed, as the options form stores them.
    pub fn trimmed(&self) -> Self {
        Self {
            webhook_url: self.webhook_url.trim().to_string(),
            auth_token: self.auth_token.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.webhook_url.trim().is_empty()
    }

    pub fn display_name(&self) -> &str {
        match self.display_name.trim() {
            "" => DEFAULT_DISPLAY_NAME,
            name => name,
        }
    }

    pub fn masked_token(&self) -> String {
        let token = self.auth_token.trim();
        if token.is_empty() {
            return "(none)".into();
        }
        let count = token.chars().count();
        if count <= 8 {
            return "*".repeat(count);
        }
        let tail: String = token.chars().skip(count - 4).collect();
        format!("{}{tail}", "*".repeat(count - 4))
    }
}
