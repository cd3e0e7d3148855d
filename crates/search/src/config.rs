use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TRIGGER: &str = "gs ";

/// Icon shared by every item, looked up next to the plugin first.
pub const ICON_FILE_NAME: &str = "settings.svg";

/// Copy of the icon kept with the crate sources, used when the install dir
/// does not carry one.
pub const BUNDLED_ICON_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/settings.svg");

/// Config file looked up next to the plugin when none is given explicitly.
pub const CONFIG_FILE_NAME: &str = "gnome_settings.toml";

/// Plugin configuration. Read-only: nothing here is ever written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Trigger the host should use for this plugin
    pub trigger: String,

    /// Explicit icon path; defaults to `settings.svg` in the install dir,
    /// then to the bundled copy
    pub icon_path: Option<PathBuf>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            trigger: DEFAULT_TRIGGER.to_string(),
            icon_path: None,
        }
    }
}

impl PluginConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded plugin config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("config {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger.trim().is_empty() {
            return Err(ConfigError::Invalid("trigger must not be blank".to_string()));
        }
        if self
            .icon_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("icon_path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Icon path for items. A configured path is used as given. Otherwise
    /// `settings.svg` inside `install_dir` wins when it exists, and the
    /// bundled copy is used when it does not.
    pub fn resolve_icon_path(&self, install_dir: &Path) -> PathBuf {
        if let Some(path) = &self.icon_path {
            return path.clone();
        }
        let installed = install_dir.join(ICON_FILE_NAME);
        if installed.is_file() {
            installed
        } else {
            log::debug!(
                "{} not found, using bundled icon {BUNDLED_ICON_PATH}",
                installed.display()
            );
            PathBuf::from(BUNDLED_ICON_PATH)
        }
    }
}
