//! Host-facing wizard
//!
//! A template host drives generation through [`GenerationWizard`] callbacks. The wizard
//! resolves configuration when the run starts, answers inclusion questions while files are
//! generated, and syncs the cache file once the project is complete.

use crate::error::WizardError;
use crate::filter::should_include;
use crate::platform::PlatformLocator;
use crate::prompt::UserPrompt;
use crate::resolver::ConfigResolver;
use crate::settings::{SettingsKey, SettingsSource};
use crate::snapshot::ConfigurationSnapshot;
use crate::sync::{ResourceSync, SyncReport};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Callbacks a template host invokes during one generation run.
pub trait GenerationWizard {
    /// The run is starting; fill `replacements` with the resolved values.
    fn run_started(
        &mut self,
        settings: &dyn SettingsSource,
        replacements: &mut HashMap<String, String>,
    ) -> Result<(), WizardError>;

    /// Whether a candidate template item becomes part of the project.
    fn should_add_project_item(&self, relative_name: &str) -> bool;

    fn before_opening_file(&self, _path: &Path) {}

    fn project_item_finished_generating(&self, _path: &Path) {}

    /// All project files exist under `project_root`.
    fn project_finished_generating(&mut self, project_root: &Path) -> Result<(), WizardError>;

    /// The run is over, successful or not.
    fn run_finished(&mut self);
}

/// Wizard for template-generated game projects.
pub struct TemplateWizard<L, P> {
    locator: L,
    prompt: P,
    settings_key: SettingsKey,
    snapshot: Option<ConfigurationSnapshot>,
    last_sync: Option<SyncReport>,
}

impl<L: PlatformLocator, P: UserPrompt> TemplateWizard<L, P> {
    pub fn new(locator: L, prompt: P) -> Self {
        Self {
            locator,
            prompt,
            settings_key: SettingsKey::default(),
            snapshot: None,
            last_sync: None,
        }
    }

    pub fn with_settings_key(mut self, key: SettingsKey) -> Self {
        self.settings_key = key;
        self
    }

    /// The snapshot of the current run, if resolution succeeded.
    pub fn snapshot(&self) -> Option<&ConfigurationSnapshot> {
        self.snapshot.as_ref()
    }

    /// Report of the last successful cache file sync in this run.
    pub fn last_sync(&self) -> Option<&SyncReport> {
        self.last_sync.as_ref()
    }

    /// Resolve without a replacement map, returning the stored snapshot.
    pub fn resolve(
        &mut self,
        settings: &dyn SettingsSource,
    ) -> Result<&ConfigurationSnapshot, WizardError> {
        self.snapshot = None;
        let resolver = ConfigResolver::new(settings, &self.locator, &self.prompt)
            .with_settings_key(self.settings_key.clone());
        let snapshot = resolver.resolve()?;
        Ok(self.snapshot.insert(snapshot))
    }

    /// Replace the stored snapshot's output path, re-checking it.
    pub fn override_output_path(&mut self, path: &Path) -> Result<(), WizardError> {
        let updated = self.current_snapshot("override the output path")?.with_output_path(path)?;
        self.snapshot = Some(updated);
        Ok(())
    }

    /// Replace the stored snapshot's game binaries path, re-checking it.
    pub fn override_game_bin_path(&mut self, path: &Path) -> Result<(), WizardError> {
        let updated = self
            .current_snapshot("override the game binaries path")?
            .with_game_bin_path(path)?;
        self.snapshot = Some(updated);
        Ok(())
    }

    /// A failed override leaves the stored snapshot untouched.
    fn current_snapshot(&self, action: &str) -> Result<ConfigurationSnapshot, WizardError> {
        self.snapshot.clone().ok_or_else(|| {
            WizardError::ContractViolation(format!(
                "cannot {} before configuration is resolved",
                action
            ))
        })
    }
}

impl<L: PlatformLocator, P: UserPrompt> GenerationWizard for TemplateWizard<L, P> {
    fn run_started(
        &mut self,
        settings: &dyn SettingsSource,
        replacements: &mut HashMap<String, String>,
    ) -> Result<(), WizardError> {
        self.last_sync = None;
        let snapshot = self.resolve(settings)?;
        snapshot.write_replacements(replacements);
        info!(version = snapshot.version(), "Configuration resolved");
        Ok(())
    }

    fn should_add_project_item(&self, relative_name: &str) -> bool {
        let promote = self.snapshot.as_ref().map(|s| s.promote()).unwrap_or(false);
        should_include(relative_name, promote)
    }

    fn project_finished_generating(&mut self, project_root: &Path) -> Result<(), WizardError> {
        let install_path = self
            .snapshot
            .as_ref()
            .map(|s| s.install_path().to_path_buf())
            .ok_or_else(|| {
                WizardError::ContractViolation(
                    "project finished generating before configuration was resolved".to_string(),
                )
            })?;

        let report = ResourceSync::new(&self.prompt).sync(&install_path, project_root)?;
        self.last_sync = Some(report);
        Ok(())
    }

    fn run_finished(&mut self) {
        self.snapshot = None;
    }
}
