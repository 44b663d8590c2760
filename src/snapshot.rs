//! Configuration snapshot
//!
//! The resolved values handed to project generation. A snapshot only ever holds
//! [`ResolvedDir`]s, so every path in it is absolute, existed when it was stored, and has
//! no trailing separator.

use crate::error::PathInvariantError;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of the generating tool stamped into every snapshot.
pub const WIZARD_VERSION: &str = concat!("project-wizard ", env!("CARGO_PKG_VERSION"));

/// Replacement keys written for downstream generation.
pub const INSTALL_PATH_KEY: &str = "$installpath$";
pub const OUTPUT_PATH_KEY: &str = "$outputpath$";
pub const GAME_BIN_PATH_KEY: &str = "$gamebinpath$";
pub const MINIFY_KEY: &str = "$minify$";
pub const VERSION_KEY: &str = "$wizardversion$";

/// Absolute, existing directory without trailing separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedDir(PathBuf);

impl ResolvedDir {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, PathInvariantError> {
        let normalized = normalize_dir(path.as_ref())?;
        if !normalized.is_dir() {
            return Err(PathInvariantError::NotADirectory(normalized));
        }
        Ok(Self(normalized))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.0.clone()
    }
}

impl AsRef<Path> for ResolvedDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ResolvedDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Make `path` absolute and rebuild it from its components, dropping trailing
/// separators and `.` segments. Symlinks are left as they are.
pub fn normalize_dir(path: &Path) -> Result<PathBuf, PathInvariantError> {
    if path.as_os_str().is_empty() {
        return Err(PathInvariantError::Empty);
    }
    let absolute = std::path::absolute(path).map_err(|source| PathInvariantError::NotAbsolute {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(absolute.components().collect())
}

/// Immutable result of one configuration resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationSnapshot {
    install_path: ResolvedDir,
    game_bin_path: ResolvedDir,
    output_path: ResolvedDir,
    minify: bool,
    promote: bool,
    version: &'static str,
}

impl ConfigurationSnapshot {
    pub(crate) fn new(
        install_path: ResolvedDir,
        game_bin_path: ResolvedDir,
        output_path: ResolvedDir,
        minify: bool,
        promote: bool,
    ) -> Self {
        Self {
            install_path,
            game_bin_path,
            output_path,
            minify,
            promote,
            version: WIZARD_VERSION,
        }
    }

    pub fn install_path(&self) -> &Path {
        self.install_path.as_path()
    }

    pub fn game_bin_path(&self) -> &Path {
        self.game_bin_path.as_path()
    }

    pub fn output_path(&self) -> &Path {
        self.output_path.as_path()
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    pub fn promote(&self) -> bool {
        self.promote
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Copy of this snapshot with a different output path.
    pub fn with_output_path(self, path: impl AsRef<Path>) -> Result<Self, PathInvariantError> {
        Ok(Self {
            output_path: ResolvedDir::new(path)?,
            ..self
        })
    }

    /// Copy of this snapshot with a different game binaries path.
    pub fn with_game_bin_path(self, path: impl AsRef<Path>) -> Result<Self, PathInvariantError> {
        Ok(Self {
            game_bin_path: ResolvedDir::new(path)?,
            ..self
        })
    }

    /// The hand-off map consumed by downstream generation.
    pub fn replacements(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        map.insert(INSTALL_PATH_KEY, self.install_path.to_string());
        map.insert(OUTPUT_PATH_KEY, self.output_path.to_string());
        map.insert(GAME_BIN_PATH_KEY, self.game_bin_path.to_string());
        map.insert(MINIFY_KEY, yes_no(self.minify).to_string());
        map.insert(VERSION_KEY, self.version.to_string());
        map
    }

    /// Write the hand-off values into a host-owned map.
    pub fn write_replacements(&self, target: &mut HashMap<String, String>) {
        for (key, value) in self.replacements() {
            target.insert(key.to_string(), value);
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
