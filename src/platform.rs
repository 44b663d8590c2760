//! Platform locations: default folders for the target game and the running module.

use crate::config::PlatformConfig;
use directories::{BaseDirs, UserDirs};
use std::path::{Path, PathBuf};

/// Subfolder of the game installation holding its binaries.
pub const GAME_BIN_SUBFOLDER: &str = "bin";

/// Data folder category and subcategory used for the default output path.
pub const OUTPUT_DATA_CATEGORY: &str = "Mods";
pub const OUTPUT_DATA_SUBCATEGORY: &str = "Builds";

/// Folder name of the game installation under the local data directory.
pub const DEFAULT_GAME_DIR: &str = "TargetGame";

/// Computes platform-specific default locations.
pub trait PlatformLocator {
    /// A subfolder of the target game's installation.
    fn install_subfolder(&self, name: &str) -> Option<PathBuf>;

    /// A per-user data folder, `<data root>/<category>/<subcategory>`.
    fn data_subfolder(&self, category: &str, subcategory: &str) -> Option<PathBuf>;

    /// Directory containing the running module.
    fn module_dir(&self) -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    }
}

impl<T: PlatformLocator + ?Sized> PlatformLocator for &T {
    fn install_subfolder(&self, name: &str) -> Option<PathBuf> {
        (**self).install_subfolder(name)
    }

    fn data_subfolder(&self, category: &str, subcategory: &str) -> Option<PathBuf> {
        (**self).data_subfolder(category, subcategory)
    }

    fn module_dir(&self) -> Option<PathBuf> {
        (**self).module_dir()
    }
}

/// Locator backed by the user's platform directories, with optional configured roots.
#[derive(Debug, Clone, Default)]
pub struct DirsLocator {
    game_root: Option<PathBuf>,
    data_root: Option<PathBuf>,
}

impl DirsLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PlatformConfig) -> Self {
        Self {
            game_root: config.game_root.clone(),
            data_root: config.data_root.clone(),
        }
    }

    fn game_root(&self) -> Option<PathBuf> {
        self.game_root.clone().or_else(|| {
            BaseDirs::new().map(|dirs| dirs.data_local_dir().join(DEFAULT_GAME_DIR))
        })
    }

    fn data_root(&self) -> Option<PathBuf> {
        self.data_root.clone().or_else(|| {
            UserDirs::new()
                .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
                .or_else(|| BaseDirs::new().map(|dirs| dirs.data_local_dir().to_path_buf()))
        })
    }
}

impl PlatformLocator for DirsLocator {
    fn install_subfolder(&self, name: &str) -> Option<PathBuf> {
        self.game_root().map(|root| root.join(name))
    }

    fn data_subfolder(&self, category: &str, subcategory: &str) -> Option<PathBuf> {
        self.data_root()
            .map(|root| root.join(category).join(subcategory))
    }
}
