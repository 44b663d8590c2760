//! Initialization of the global configuration file
//!
//! `project-wizard init` writes a starter `config.toml` with the platform, logging and
//! settings sections so users have something to edit.

use crate::config::{global_config_path, PlatformConfig};
use crate::error::WizardError;
use crate::logging::LoggingConfig;
use crate::settings::{SettingName, SettingsKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What `init` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    Skipped(PathBuf),
}

#[derive(Serialize)]
struct StarterFile {
    platform: PlatformConfig,
    logging: LoggingConfig,
    settings: BTreeMap<String, BTreeMap<String, BTreeMap<&'static str, toml::Value>>>,
}

fn starter_settings() -> BTreeMap<&'static str, toml::Value> {
    SettingName::ALL
        .iter()
        .map(|name| {
            let value = match name {
                SettingName::GameBinPath | SettingName::OutputPath => {
                    toml::Value::String(String::new())
                }
                _ => toml::Value::Boolean(false),
            };
            (name.key(), value)
        })
        .collect()
}

/// Render the starter configuration.
pub fn starter_config() -> Result<String, WizardError> {
    let key = SettingsKey::default();
    let mut categories = BTreeMap::new();
    categories.insert(key.category.clone(), starter_settings());
    let mut settings = BTreeMap::new();
    settings.insert(key.namespace.clone(), categories);

    let file = StarterFile {
        platform: PlatformConfig::default(),
        logging: LoggingConfig::default(),
        settings,
    };
    toml::to_string_pretty(&file)
        .map_err(|e| WizardError::ConfigError(format!("Failed to render starter config: {}", e)))
}

/// Write the starter configuration to `path`; existing files are kept unless `force`.
pub fn initialize_config_at(path: &Path, force: bool) -> Result<InitOutcome, WizardError> {
    let existed = path.exists();
    if existed && !force {
        return Ok(InitOutcome::Skipped(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, starter_config()?)?;

    if existed {
        Ok(InitOutcome::Overwritten(path.to_path_buf()))
    } else {
        Ok(InitOutcome::Created(path.to_path_buf()))
    }
}

/// Write the starter configuration to the global config location.
pub fn initialize_config(force: bool) -> Result<InitOutcome, WizardError> {
    let path = global_config_target()?;
    initialize_config_at(&path, force)
}

/// Where `init` would write, and whether a file is already there.
pub fn preview() -> Result<(PathBuf, bool), WizardError> {
    let path = global_config_target()?;
    let exists = path.exists();
    Ok((path, exists))
}

fn global_config_target() -> Result<PathBuf, WizardError> {
    global_config_path().ok_or_else(|| {
        WizardError::ConfigError(
            "Cannot determine config directory (neither XDG_CONFIG_HOME nor HOME is set)"
                .to_string(),
        )
    })
}
