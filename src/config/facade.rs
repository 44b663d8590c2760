//! Config loading facade: assembles the layered sources into one `config::Config`.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::WizardConfig;
use config::{Config, ConfigError, File};
use std::path::Path;

/// Loads the layered configuration.
///
/// Precedence (lowest to highest): defaults, global file, workspace files, environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Build the raw layered configuration for a workspace.
    pub fn build(workspace_root: &Path) -> Result<Config, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        environment::add_to_builder(builder).build()
    }

    /// Build the raw configuration from one explicit file plus environment overrides.
    pub fn build_from_file(path: &Path) -> Result<Config, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        environment::add_to_builder(builder).build()
    }

    /// Load and deserialize the tool configuration for a workspace.
    pub fn load(workspace_root: &Path) -> Result<WizardConfig, ConfigError> {
        Self::build(workspace_root)?.try_deserialize()
    }

    /// Load and deserialize the tool configuration from one file.
    pub fn load_from_file(path: &Path) -> Result<WizardConfig, ConfigError> {
        Self::build_from_file(path)?.try_deserialize()
    }
}
