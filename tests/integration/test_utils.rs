//! Shared test utilities for integration tests
//!
//! Centralizes environment isolation and the on-disk layout of a fake game installation
//! so scenarios only describe what differs.

use project_wizard::platform::{
    PlatformLocator, GAME_BIN_SUBFOLDER, OUTPUT_DATA_CATEGORY, OUTPUT_DATA_SUBCATEGORY,
};
use project_wizard::sync::cache_source_path;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(names: &[&str]) -> Self {
        Self {
            vars: names
                .iter()
                .map(|name| (name.to_string(), std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(orig) => std::env::set_var(&name, orig),
                None => std::env::remove_var(&name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`, plus any extra
/// variables, then restore the original environment.
pub fn with_env<F, R>(test_dir: &TempDir, extra: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let mut names = vec!["HOME", "XDG_CONFIG_HOME", "PROJECT_WIZARD_ENV"];
    names.extend(extra.iter().map(|(name, _)| *name));
    let env_state = EnvState::capture(&names);

    let test_config_home = test_dir.path().join("xdg");
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);
    std::env::remove_var("PROJECT_WIZARD_ENV");
    for (name, value) in extra {
        std::env::set_var(name, value);
    }

    let result = f();

    env_state.restore();

    result
}

/// Run `f` with an isolated HOME and XDG_CONFIG_HOME.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    with_env(test_dir, &[], f)
}

/// Locator with fixed roots.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    pub game_root: Option<PathBuf>,
    pub data_root: Option<PathBuf>,
    pub module_dir: Option<PathBuf>,
}

impl PlatformLocator for FixedLocator {
    fn install_subfolder(&self, name: &str) -> Option<PathBuf> {
        self.game_root.as_ref().map(|root| root.join(name))
    }

    fn data_subfolder(&self, category: &str, subcategory: &str) -> Option<PathBuf> {
        self.data_root
            .as_ref()
            .map(|root| root.join(category).join(subcategory))
    }

    fn module_dir(&self) -> Option<PathBuf> {
        self.module_dir.clone()
    }
}

/// A temporary game installation, user data root and wizard install directory.
///
/// Layout under the temp dir:
/// - `game/bin`      default game binaries path (created)
/// - `data`          data root; `data/Mods/Builds` is the default output (not created)
/// - `wizard`        install path of the wizard module (created)
/// - `project`       generated project root (created)
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        for sub in ["game/bin", "data", "wizard", "project"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn game_root(&self) -> PathBuf {
        self.path("game")
    }

    pub fn default_game_bin(&self) -> PathBuf {
        self.game_root().join(GAME_BIN_SUBFOLDER)
    }

    pub fn default_output(&self) -> PathBuf {
        self.path("data")
            .join(OUTPUT_DATA_CATEGORY)
            .join(OUTPUT_DATA_SUBCATEGORY)
    }

    pub fn install_dir(&self) -> PathBuf {
        self.path("wizard")
    }

    pub fn project_root(&self) -> PathBuf {
        self.path("project")
    }

    pub fn locator(&self) -> FixedLocator {
        FixedLocator {
            game_root: Some(self.game_root()),
            data_root: Some(self.path("data")),
            module_dir: Some(self.install_dir()),
        }
    }

    /// Place the template cache file in the install directory.
    pub fn write_cache_file(&self, contents: &str) -> PathBuf {
        let source = cache_source_path(&self.install_dir());
        std::fs::create_dir_all(source.parent().unwrap()).unwrap();
        std::fs::write(&source, contents).unwrap();
        source
    }
}

/// A regular file whose path can never become a directory.
pub fn blocking_file(dir: &Path) -> PathBuf {
    let path = dir.join("blocker.txt");
    std::fs::write(&path, "not a directory").unwrap();
    path
}
