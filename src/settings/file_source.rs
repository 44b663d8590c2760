//! Settings store backed by the layered configuration files.
//!
//! Settings live in `[settings.<namespace>.<category>]` tables. The configuration is rebuilt
//! on every lookup so a retry sees edits made while the user was being asked.

use super::{SettingName, SettingValue, SettingsKey, SettingsObject, SettingsSource};
use crate::config::ConfigLoader;
use config::{Config, ConfigError, ValueKind};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Where the layered configuration comes from.
#[derive(Debug, Clone)]
enum Origin {
    Workspace(PathBuf),
    File(PathBuf),
}

/// [`SettingsSource`] reading the same files as [`ConfigLoader`].
#[derive(Debug, Clone)]
pub struct ConfigSettingsSource {
    origin: Origin,
}

impl ConfigSettingsSource {
    /// Global, workspace and environment layers for `workspace_root`.
    pub fn for_workspace(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::Workspace(workspace_root.into()),
        }
    }

    /// One explicit file plus environment overrides.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }

    fn build(&self) -> Result<Config, ConfigError> {
        match &self.origin {
            Origin::Workspace(root) => ConfigLoader::build(root),
            Origin::File(path) => ConfigLoader::build_from_file(path),
        }
    }
}

impl SettingsSource for ConfigSettingsSource {
    fn settings_object(&self, key: &SettingsKey) -> Option<SettingsObject> {
        let config = match self.build() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Settings store could not be read");
                return None;
            }
        };

        let table_path = format!("settings.{}.{}", key.namespace, key.category);
        let table = match config.get_table(&table_path) {
            Ok(table) => table,
            Err(e) => {
                debug!(table = %table_path, error = %e, "Settings table not found");
                return None;
            }
        };

        let mut object = SettingsObject::new();
        for name in SettingName::ALL {
            let Some(value) = table.get(name.key()) else {
                continue;
            };
            match &value.kind {
                ValueKind::Boolean(flag) => object.set(name, SettingValue::Bool(*flag)),
                ValueKind::String(text) => object.set(name, SettingValue::Text(text.clone())),
                other => {
                    debug!(
                        setting = name.key(),
                        value = ?other,
                        "Ignoring setting with unexpected type"
                    );
                }
            }
        }
        Some(object)
    }
}
