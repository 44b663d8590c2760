//! Configuration System
//!
//! The tool's own configuration: where the target platform lives, and how to log. It is
//! layered with the `config` crate from defaults, a global file, workspace files and the
//! environment. The same layered files also carry the `[settings.*]` tables read by
//! [`crate::settings::ConfigSettingsSource`].

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::ENV_PREFIX;
pub use sources::global_file::{global_config_dir, global_config_path};
pub use sources::workspace_file::WORKSPACE_CONFIG_DIR;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Target platform locations
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the target platform keeps its binaries and user data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Installation root of the target game; binaries live in a subfolder of it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_root: Option<PathBuf>,

    /// Root for per-user data folders (default: the documents directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
}

impl WizardConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(root) = &self.platform.game_root {
            if root.as_os_str().is_empty() {
                errors.push("platform.game_root cannot be empty".to_string());
            }
        }
        if let Some(root) = &self.platform.data_root {
            if root.as_os_str().is_empty() {
                errors.push("platform.data_root cannot be empty".to_string());
            }
        }
        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
