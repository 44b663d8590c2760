//! Resolution scenarios driven through the retry-or-cancel loop.

use crate::integration::test_utils::{blocking_file, Fixture, FixedLocator};
use project_wizard::error::{CancelReason, ResolutionStep};
use project_wizard::platform::PlatformLocator;
use project_wizard::prompt::{PromptOption, ScriptedPrompt};
use project_wizard::settings::{
    InMemorySettingsSource, SettingName, SettingsKey, SettingsObject, SettingsSource,
};
use project_wizard::ConfigResolver;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn defaults_source() -> InMemorySettingsSource {
    InMemorySettingsSource::with_object(SettingsKey::default(), SettingsObject::new())
}

#[test]
fn defaults_resolve_without_prompting() {
    let fixture = Fixture::new();
    let settings = defaults_source();
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::default();

    let snapshot = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap();

    assert_eq!(snapshot.game_bin_path(), fixture.default_game_bin());
    assert_eq!(snapshot.output_path(), fixture.default_output());
    assert_eq!(snapshot.install_path(), fixture.install_dir());
    assert!(!snapshot.minify());
    assert!(!snapshot.promote());
    assert!(fixture.default_output().is_dir(), "output path is created");
    assert!(prompt.asked().is_empty());
}

#[test]
fn missing_settings_then_retry_after_user_fixes_them() {
    let fixture = Fixture::new();
    let settings = Arc::new(InMemorySettingsSource::new());
    let locator = fixture.locator();

    let hook_settings = Arc::clone(&settings);
    let prompt = ScriptedPrompt::new([PromptOption::Retry]).on_ask(move |_| {
        hook_settings.insert(SettingsKey::default(), SettingsObject::new());
    });

    let snapshot = ConfigResolver::new(&*settings, &locator, &prompt)
        .resolve()
        .unwrap();

    let asked = prompt.asked();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].title, "Settings not found");
    assert_eq!(snapshot.game_bin_path(), fixture.default_game_bin());
    assert_eq!(snapshot.output_path(), fixture.default_output());
}

#[test]
fn missing_settings_then_cancel() {
    let fixture = Fixture::new();
    let settings = InMemorySettingsSource::new();
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::new([PromptOption::Cancel]);

    let err = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap_err();

    assert_eq!(
        err.reason,
        CancelReason::UserCancelled {
            step: ResolutionStep::LoadSettings
        }
    );
    assert!(!fixture.default_output().exists(), "nothing after the failed step runs");
}

#[test]
fn manual_game_bin_path_is_used_when_enabled() {
    let fixture = Fixture::new();
    let custom = fixture.path("custom/bin");
    std::fs::create_dir_all(&custom).unwrap();

    let settings = InMemorySettingsSource::with_object(
        SettingsKey::default(),
        SettingsObject::new()
            .with_flag(SettingName::UseManualGameBinPath, true)
            .with_text(SettingName::GameBinPath, custom.to_string_lossy()),
    );
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::default();

    let snapshot = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap();
    assert_eq!(snapshot.game_bin_path(), custom);
}

#[test]
fn stored_path_is_ignored_when_toggle_is_off() {
    let fixture = Fixture::new();
    let settings = InMemorySettingsSource::with_object(
        SettingsKey::default(),
        SettingsObject::new()
            .with_flag(SettingName::UseManualOutputPath, false)
            .with_text(SettingName::OutputPath, "/definitely/not/here"),
    );
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::default();

    let snapshot = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap();
    assert_eq!(snapshot.output_path(), fixture.default_output());
}

#[test]
fn trailing_separator_is_normalized_away() {
    let fixture = Fixture::new();
    let custom = fixture.path("custom/out");
    let with_separator = format!("{}{}", custom.display(), std::path::MAIN_SEPARATOR);

    let settings = InMemorySettingsSource::with_object(
        SettingsKey::default(),
        SettingsObject::new()
            .with_flag(SettingName::UseManualOutputPath, true)
            .with_text(SettingName::OutputPath, with_separator),
    );
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::default();

    let snapshot = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap();

    assert_eq!(snapshot.output_path(), custom);
    assert!(!snapshot
        .output_path()
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR));
}

#[test]
fn missing_game_bin_path_retries_until_it_appears() {
    let fixture = Fixture::new();
    std::fs::remove_dir_all(fixture.default_game_bin()).unwrap();

    let settings = defaults_source();
    let locator = fixture.locator();
    let bin = fixture.default_game_bin();
    let prompt = ScriptedPrompt::new([PromptOption::Retry]).on_ask(move |_| {
        std::fs::create_dir_all(&bin).unwrap();
    });

    let snapshot = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap();

    let asked = prompt.asked();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].title, "Game binaries path not found");
    assert_eq!(snapshot.game_bin_path(), fixture.default_game_bin());
}

#[test]
fn output_creation_failure_then_cancel_keeps_nothing() {
    let fixture = Fixture::new();
    let blocker = blocking_file(fixture.dir.path());

    let settings = InMemorySettingsSource::with_object(
        SettingsKey::default(),
        SettingsObject::new()
            .with_flag(SettingName::UseManualOutputPath, true)
            .with_text(SettingName::OutputPath, blocker.join("out").to_string_lossy()),
    );
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::new([PromptOption::Retry, PromptOption::Cancel]);

    let err = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap_err();

    assert_eq!(
        err.reason,
        CancelReason::UserCancelled {
            step: ResolutionStep::OutputPath
        }
    );
    let asked = prompt.asked();
    assert_eq!(asked.len(), 2, "one prompt per failed attempt");
    assert!(asked.iter().all(|d| d.title == "Cannot create output path"));
}

#[test]
fn missing_install_path_is_reported() {
    let fixture = Fixture::new();
    let settings = defaults_source();
    let locator = FixedLocator {
        module_dir: Some(fixture.path("not-installed")),
        ..fixture.locator()
    };
    let prompt = ScriptedPrompt::new([PromptOption::Cancel]);

    let err = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap_err();

    assert_eq!(
        err.reason,
        CancelReason::UserCancelled {
            step: ResolutionStep::InstallPath
        }
    );
    assert_eq!(prompt.asked()[0].title, "Install path not found");
}

#[test]
fn flags_are_read_from_settings() {
    let fixture = Fixture::new();
    let settings = InMemorySettingsSource::with_object(
        SettingsKey::default(),
        SettingsObject::new()
            .with_flag(SettingName::Minify, true)
            .with_flag(SettingName::Promote, true),
    );
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::default();

    let snapshot = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap();
    assert!(snapshot.minify());
    assert!(snapshot.promote());
}

#[test]
fn custom_settings_key_is_honored() {
    let fixture = Fixture::new();
    let key = SettingsKey::new("studio", "builds");
    let settings = InMemorySettingsSource::with_object(
        key.clone(),
        SettingsObject::new().with_flag(SettingName::Minify, true),
    );
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::default();

    let snapshot = ConfigResolver::new(&settings, &locator, &prompt)
        .with_settings_key(key)
        .resolve()
        .unwrap();
    assert!(snapshot.minify());
}

/// Locator that drops the settings object when the install path is looked up,
/// which happens after both path steps and before the flags are read.
struct ForgetfulLocator {
    inner: FixedLocator,
    settings: Arc<InMemorySettingsSource>,
}

impl PlatformLocator for ForgetfulLocator {
    fn install_subfolder(&self, name: &str) -> Option<PathBuf> {
        self.inner.install_subfolder(name)
    }

    fn data_subfolder(&self, category: &str, subcategory: &str) -> Option<PathBuf> {
        self.inner.data_subfolder(category, subcategory)
    }

    fn module_dir(&self) -> Option<PathBuf> {
        self.settings.remove(&SettingsKey::default());
        self.inner.module_dir()
    }
}

#[test]
fn flags_read_false_when_settings_vanish_before_flag_step() {
    let fixture = Fixture::new();
    let settings = Arc::new(InMemorySettingsSource::with_object(
        SettingsKey::default(),
        SettingsObject::new()
            .with_flag(SettingName::Minify, true)
            .with_flag(SettingName::Promote, true),
    ));
    let locator = ForgetfulLocator {
        inner: fixture.locator(),
        settings: Arc::clone(&settings),
    };
    let prompt = ScriptedPrompt::default();

    let snapshot = ConfigResolver::new(&*settings, &locator, &prompt)
        .resolve()
        .unwrap();

    assert!(!snapshot.minify());
    assert!(!snapshot.promote());
    assert!(prompt.asked().is_empty());
}

/// Source that answers the first lookup only.
#[derive(Default)]
struct OneShotSource {
    lookups: AtomicUsize,
}

impl SettingsSource for OneShotSource {
    fn settings_object(&self, _key: &SettingsKey) -> Option<SettingsObject> {
        if self.lookups.fetch_add(1, Ordering::SeqCst) == 0 {
            Some(SettingsObject::new())
        } else {
            None
        }
    }
}

#[test]
fn settings_vanishing_after_load_prompts_in_game_bin_step() {
    let fixture = Fixture::new();
    let settings = OneShotSource::default();
    let locator = fixture.locator();
    let prompt = ScriptedPrompt::new([PromptOption::Cancel]);

    let err = ConfigResolver::new(&settings, &locator, &prompt)
        .resolve()
        .unwrap_err();

    assert_eq!(
        err.reason,
        CancelReason::UserCancelled {
            step: ResolutionStep::GameBinPath
        }
    );
    let asked = prompt.asked();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].title, "Settings not found");
}
