//! Error types for the project wizard.
//!
//! Recoverable failures are [`ResolutionError`]s: they are shown to the user through the
//! retry-or-cancel loop and never escape a resolution step. The only thing that leaves a
//! step is [`RunCancelled`], which aborts the whole generation run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which configured directory a path error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    GameBin,
    Output,
    Install,
    CacheFile,
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathRole::GameBin => "game binaries path",
            PathRole::Output => "output path",
            PathRole::Install => "install path",
            PathRole::CacheFile => "cache file",
        };
        f.write_str(name)
    }
}

/// The resolution step that was running when the user cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStep {
    LoadSettings,
    GameBinPath,
    OutputPath,
    InstallPath,
    ResourceSync,
}

impl fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionStep::LoadSettings => "load settings",
            ResolutionStep::GameBinPath => "resolve game binaries path",
            ResolutionStep::OutputPath => "resolve output path",
            ResolutionStep::InstallPath => "resolve install path",
            ResolutionStep::ResourceSync => "sync cache file",
        };
        f.write_str(name)
    }
}

/// Failures a single resolution attempt can report.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Settings '{namespace}.{category}' could not be found")]
    MissingSettings { namespace: String, category: String },

    #[error("The {role} does not exist: {}", .path.display())]
    PathNotFound { role: PathRole, path: PathBuf },

    #[error("Cannot create {role} {}: {source}", .path.display())]
    PathCreationFailed {
        role: PathRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required install resource is missing: {}", .0.display())]
    MissingInstallResource(PathBuf),
}

impl ResolutionError {
    /// Dialog title shown for this error.
    pub fn title(&self) -> &'static str {
        match self {
            ResolutionError::MissingSettings { .. } => "Settings not found",
            ResolutionError::PathNotFound {
                role: PathRole::Install,
                ..
            } => "Install path not found",
            ResolutionError::PathNotFound { .. } => "Game binaries path not found",
            ResolutionError::PathCreationFailed {
                role: PathRole::CacheFile,
                ..
            } => "Cannot write cache file",
            ResolutionError::PathCreationFailed { .. } => "Cannot create output path",
            ResolutionError::MissingInstallResource(_) => "Installation is incomplete",
        }
    }
}

/// Why a run was aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    UserCancelled { step: ResolutionStep },
    MissingInstallResource { path: PathBuf },
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::UserCancelled { step } => {
                write!(f, "cancelled by user during '{}'", step)
            }
            CancelReason::MissingInstallResource { path } => {
                write!(f, "install resource missing at {}", path.display())
            }
        }
    }
}

/// Terminal signal: the generation run must stop and nothing resolved is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Run cancelled: {reason}")]
pub struct RunCancelled {
    pub reason: CancelReason,
}

impl RunCancelled {
    pub fn by_user(step: ResolutionStep) -> Self {
        Self {
            reason: CancelReason::UserCancelled { step },
        }
    }

    pub fn missing_resource(path: PathBuf) -> Self {
        Self {
            reason: CancelReason::MissingInstallResource { path },
        }
    }
}

/// A path that cannot be stored in a snapshot.
#[derive(Debug, Error)]
pub enum PathInvariantError {
    #[error("Path is empty")]
    Empty,

    #[error("Cannot make path absolute {}: {source}", .path.display())]
    NotAbsolute {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not an existing directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Top-level error surfaced to hosts and the CLI.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Cancelled(#[from] RunCancelled),

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Invalid path override: {0}")]
    InvalidPath(#[from] PathInvariantError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WizardError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WizardError::Cancelled(_))
    }
}

impl From<config::ConfigError> for WizardError {
    fn from(err: config::ConfigError) -> Self {
        WizardError::ConfigError(err.to_string())
    }
}
