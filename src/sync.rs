//! Cache file sync
//!
//! After the host has generated the project, the template cache file shipped with the
//! installation is copied into the project. Copy failures go through retry-or-cancel; a
//! missing source file means a broken installation and ends the run.

use crate::error::{PathRole, ResolutionError, ResolutionStep, RunCancelled};
use crate::prompt::UserPrompt;
use crate::recovery::{report_fatal, retry_or_cancel};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, info_span};

/// Location of the cache file relative to the install path.
pub const CACHE_SOURCE_SUBPATH: [&str; 3] = ["Resources", "Cache", "template.cache"];

/// Location of the cache file relative to the generated project root.
pub const CACHE_TARGET_SUBPATH: [&str; 3] = [".wizard", "cache", "template.cache"];

/// What a successful sync did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub bytes_copied: u64,
}

pub fn cache_source_path(install_path: &Path) -> PathBuf {
    CACHE_SOURCE_SUBPATH
        .iter()
        .fold(install_path.to_path_buf(), |path, part| path.join(part))
}

pub fn cache_target_path(project_root: &Path) -> PathBuf {
    CACHE_TARGET_SUBPATH
        .iter()
        .fold(project_root.to_path_buf(), |path, part| path.join(part))
}

/// Copies the cache file into a generated project.
pub struct ResourceSync<'a> {
    prompt: &'a dyn UserPrompt,
}

impl<'a> ResourceSync<'a> {
    pub fn new(prompt: &'a dyn UserPrompt) -> Self {
        Self { prompt }
    }

    pub fn sync(
        &self,
        install_path: &Path,
        project_root: &Path,
    ) -> Result<SyncReport, RunCancelled> {
        let span = info_span!("sync_cache_file", project = %project_root.display());
        let _enter = span.enter();

        let source = cache_source_path(install_path);
        if !source.is_file() {
            return Err(report_fatal(self.prompt, source));
        }
        let target = cache_target_path(project_root);

        let bytes_copied = retry_or_cancel(self.prompt, ResolutionStep::ResourceSync, || {
            copy_with_parents(&source, &target)
        })?;

        info!(
            source = %source.display(),
            target = %target.display(),
            bytes = bytes_copied,
            "Cache file synced"
        );
        Ok(SyncReport {
            source,
            target,
            bytes_copied,
        })
    }
}

fn copy_with_parents(source: &Path, target: &Path) -> Result<u64, ResolutionError> {
    let failed = |source: std::io::Error| ResolutionError::PathCreationFailed {
        role: PathRole::CacheFile,
        path: target.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent() {
        if !parent.is_dir() {
            std::fs::create_dir_all(parent).map_err(failed)?;
        }
    }
    std::fs::copy(source, target).map_err(failed)
}
