//! Typed settings access
//!
//! The wizard reads a fixed set of named settings from an external store. Callers never do
//! ad-hoc string lookups: every read goes through [`SettingName`] and comes back as a typed
//! optional value.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

mod file_source;

pub use file_source::ConfigSettingsSource;

/// Every setting the wizard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingName {
    UseManualGameBinPath,
    GameBinPath,
    UseManualOutputPath,
    OutputPath,
    Minify,
    Promote,
}

impl SettingName {
    pub const ALL: [SettingName; 6] = [
        SettingName::UseManualGameBinPath,
        SettingName::GameBinPath,
        SettingName::UseManualOutputPath,
        SettingName::OutputPath,
        SettingName::Minify,
        SettingName::Promote,
    ];

    /// Storage key used by file-backed stores.
    pub fn key(self) -> &'static str {
        match self {
            SettingName::UseManualGameBinPath => "use_manual_game_bin_path",
            SettingName::GameBinPath => "game_bin_path",
            SettingName::UseManualOutputPath => "use_manual_output_path",
            SettingName::OutputPath => "output_path",
            SettingName::Minify => "minify",
            SettingName::Promote => "promote",
        }
    }
}

/// A stored value in one of the shapes the wizard understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

/// Identifies the settings object inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingsKey {
    pub namespace: String,
    pub category: String,
}

impl SettingsKey {
    pub fn new(namespace: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            category: category.into(),
        }
    }
}

impl Default for SettingsKey {
    fn default() -> Self {
        Self::new("project_wizard", "general")
    }
}

/// One settings object as read from the store at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsObject {
    values: BTreeMap<SettingName, SettingValue>,
}

impl SettingsObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: SettingName, value: SettingValue) -> Self {
        self.values.insert(name, value);
        self
    }

    pub fn with_flag(self, name: SettingName, value: bool) -> Self {
        self.with(name, SettingValue::Bool(value))
    }

    pub fn with_text(self, name: SettingName, value: impl Into<String>) -> Self {
        self.with(name, SettingValue::Text(value.into()))
    }

    pub fn set(&mut self, name: SettingName, value: SettingValue) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: SettingName) -> Option<&SettingValue> {
        self.values.get(&name)
    }

    pub fn bool(&self, name: SettingName) -> Option<bool> {
        match self.values.get(&name) {
            Some(SettingValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Boolean value, `false` when absent or stored with another shape.
    pub fn flag(&self, name: SettingName) -> bool {
        self.bool(name).unwrap_or(false)
    }

    pub fn text(&self, name: SettingName) -> Option<&str> {
        match self.values.get(&name) {
            Some(SettingValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// External settings store.
pub trait SettingsSource {
    /// Fetch the settings object, or `None` when the store has no such object.
    fn settings_object(&self, key: &SettingsKey) -> Option<SettingsObject>;
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn settings_object(&self, key: &SettingsKey) -> Option<SettingsObject> {
        (**self).settings_object(key)
    }
}

/// Settings kept in memory, for hosts that own their own storage.
#[derive(Debug, Default)]
pub struct InMemorySettingsSource {
    objects: RwLock<HashMap<SettingsKey, SettingsObject>>,
}

impl InMemorySettingsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(key: SettingsKey, object: SettingsObject) -> Self {
        let source = Self::new();
        source.insert(key, object);
        source
    }

    pub fn insert(&self, key: SettingsKey, object: SettingsObject) {
        self.objects.write().insert(key, object);
    }

    pub fn remove(&self, key: &SettingsKey) -> Option<SettingsObject> {
        self.objects.write().remove(key)
    }

    /// Change a single value of an existing object, creating the object if needed.
    pub fn set(&self, key: &SettingsKey, name: SettingName, value: SettingValue) {
        self.objects
            .write()
            .entry(key.clone())
            .or_default()
            .set(name, value);
    }
}

impl SettingsSource for InMemorySettingsSource {
    fn settings_object(&self, key: &SettingsKey) -> Option<SettingsObject> {
        self.objects.read().get(key).cloned()
    }
}
