//! Configuration resolution
//!
//! Builds a [`ConfigurationSnapshot`] in a fixed order: settings, game binaries path,
//! output path, install path, then the two flags. Each path step runs inside the
//! retry-or-cancel loop and re-reads the settings store on every attempt.

use crate::error::{PathRole, ResolutionError, ResolutionStep, RunCancelled};
use crate::platform::{
    PlatformLocator, GAME_BIN_SUBFOLDER, OUTPUT_DATA_CATEGORY, OUTPUT_DATA_SUBCATEGORY,
};
use crate::prompt::UserPrompt;
use crate::recovery::retry_or_cancel;
use crate::settings::{SettingName, SettingsKey, SettingsObject, SettingsSource};
use crate::snapshot::{ConfigurationSnapshot, ResolvedDir};
use std::path::PathBuf;
use tracing::{debug, info, info_span};

/// Resolves the configuration for one generation run.
pub struct ConfigResolver<'a> {
    settings: &'a dyn SettingsSource,
    locator: &'a dyn PlatformLocator,
    prompt: &'a dyn UserPrompt,
    key: SettingsKey,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(
        settings: &'a dyn SettingsSource,
        locator: &'a dyn PlatformLocator,
        prompt: &'a dyn UserPrompt,
    ) -> Self {
        Self {
            settings,
            locator,
            prompt,
            key: SettingsKey::default(),
        }
    }

    pub fn with_settings_key(mut self, key: SettingsKey) -> Self {
        self.key = key;
        self
    }

    /// Resolve every value, or stop with [`RunCancelled`].
    pub fn resolve(&self) -> Result<ConfigurationSnapshot, RunCancelled> {
        let span = info_span!(
            "resolve_configuration",
            namespace = %self.key.namespace,
            category = %self.key.category
        );
        let _enter = span.enter();

        retry_or_cancel(self.prompt, ResolutionStep::LoadSettings, || {
            self.fetch_settings()
        })?;

        let game_bin_path = retry_or_cancel(self.prompt, ResolutionStep::GameBinPath, || {
            self.try_game_bin_path()
        })?;
        info!(path = %game_bin_path, "Resolved game binaries path");

        let output_path = retry_or_cancel(self.prompt, ResolutionStep::OutputPath, || {
            self.try_output_path()
        })?;
        info!(path = %output_path, "Resolved output path");

        let install_path = retry_or_cancel(self.prompt, ResolutionStep::InstallPath, || {
            self.try_install_path()
        })?;
        info!(path = %install_path, "Resolved install path");

        let minify = self.read_flag(SettingName::Minify);
        let promote = self.read_flag(SettingName::Promote);
        debug!(minify, promote, "Resolved flags");

        Ok(ConfigurationSnapshot::new(
            install_path,
            game_bin_path,
            output_path,
            minify,
            promote,
        ))
    }

    fn fetch_settings(&self) -> Result<SettingsObject, ResolutionError> {
        self.settings
            .settings_object(&self.key)
            .ok_or_else(|| ResolutionError::MissingSettings {
                namespace: self.key.namespace.clone(),
                category: self.key.category.clone(),
            })
    }

    fn try_game_bin_path(&self) -> Result<ResolvedDir, ResolutionError> {
        let settings = self.fetch_settings()?;
        let candidate = manual_path(
            &settings,
            SettingName::UseManualGameBinPath,
            SettingName::GameBinPath,
        )
        .or_else(|| self.locator.install_subfolder(GAME_BIN_SUBFOLDER))
        .ok_or_else(|| ResolutionError::PathNotFound {
            role: PathRole::GameBin,
            path: PathBuf::from(GAME_BIN_SUBFOLDER),
        })?;

        ResolvedDir::new(&candidate).map_err(|_| ResolutionError::PathNotFound {
            role: PathRole::GameBin,
            path: candidate,
        })
    }

    fn try_output_path(&self) -> Result<ResolvedDir, ResolutionError> {
        let settings = self.fetch_settings()?;
        let candidate = manual_path(
            &settings,
            SettingName::UseManualOutputPath,
            SettingName::OutputPath,
        )
        .or_else(|| {
            self.locator
                .data_subfolder(OUTPUT_DATA_CATEGORY, OUTPUT_DATA_SUBCATEGORY)
        })
        .ok_or_else(|| ResolutionError::PathCreationFailed {
            role: PathRole::Output,
            path: PathBuf::new(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no default output location exists on this platform",
            ),
        })?;

        if !candidate.is_dir() {
            std::fs::create_dir_all(&candidate).map_err(|source| {
                ResolutionError::PathCreationFailed {
                    role: PathRole::Output,
                    path: candidate.clone(),
                    source,
                }
            })?;
            info!(path = %candidate.display(), "Created output directory");
        }

        ResolvedDir::new(&candidate).map_err(|e| ResolutionError::PathCreationFailed {
            role: PathRole::Output,
            path: candidate.clone(),
            source: std::io::Error::other(e.to_string()),
        })
    }

    fn try_install_path(&self) -> Result<ResolvedDir, ResolutionError> {
        let module_dir = self
            .locator
            .module_dir()
            .ok_or_else(|| ResolutionError::PathNotFound {
                role: PathRole::Install,
                path: PathBuf::new(),
            })?;

        ResolvedDir::new(&module_dir).map_err(|_| ResolutionError::PathNotFound {
            role: PathRole::Install,
            path: module_dir,
        })
    }

    /// A failed lookup here reads as `false`; flags never abort the run.
    fn read_flag(&self, name: SettingName) -> bool {
        self.settings
            .settings_object(&self.key)
            .map(|settings| settings.flag(name))
            .unwrap_or(false)
    }
}

/// The stored path, when the manual toggle is on and the path is not blank.
fn manual_path(
    settings: &SettingsObject,
    toggle: SettingName,
    path: SettingName,
) -> Option<PathBuf> {
    if !settings.flag(toggle) {
        return None;
    }
    settings
        .text(path)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}
