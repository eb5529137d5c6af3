//! Preferences
//!
//! The user-facing settings the navigator reads, the store abstraction they
//! come from, and a TOML-backed loader for the `[landmarks]` namespace.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Namespace watched for changes
pub const PREF_BRANCH: &str = "extensions.landmarks.";

pub const BORDER_MODE: &str = "borderMode";
pub const NEXT_KEY: &str = "nextKey";
pub const PREVIOUS_KEY: &str = "previousKey";
pub const SHIFT_MODIFIER: &str = "shiftModifier";
pub const CONTROL_MODIFIER: &str = "controlModifier";

/// Preference errors
#[derive(Debug, thiserror::Error)]
pub enum PrefError {
    #[error("Preference not set: {0}")]
    Missing(String),

    #[error("Preference {key} is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Highlight behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    None,
    #[default]
    Persistent,
    Momentary,
}

impl BorderMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "persistent" => Some(Self::Persistent),
            "momentary" => Some(Self::Momentary),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Persistent => "persistent",
            Self::Momentary => "momentary",
        }
    }

    /// Whether focusing draws a highlight at all
    pub fn highlights(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigator settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "borderMode")]
    pub border_mode: BorderMode,
    #[serde(rename = "nextKey")]
    pub next_key: String,
    #[serde(rename = "previousKey")]
    pub previous_key: String,
    #[serde(rename = "shiftModifier")]
    pub use_shift: bool,
    #[serde(rename = "controlModifier")]
    pub use_control: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            border_mode: BorderMode::Persistent,
            next_key: "n".to_string(),
            previous_key: "p".to_string(),
            use_shift: true,
            use_control: false,
        }
    }
}

impl Configuration {
    /// Read every setting from a store. Any missing or malformed value is an error.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, PrefError> {
        let mode = store.get_string(BORDER_MODE)?;
        let border_mode = BorderMode::parse(&mode).ok_or_else(|| PrefError::InvalidValue {
            key: BORDER_MODE.to_string(),
            value: mode.clone(),
        })?;

        let config = Self {
            border_mode,
            next_key: store.get_string(NEXT_KEY)?,
            previous_key: store.get_string(PREVIOUS_KEY)?,
            use_shift: store.get_bool(SHIFT_MODIFIER)?,
            use_control: store.get_bool(CONTROL_MODIFIER)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PrefError> {
        for (key, value) in [(NEXT_KEY, &self.next_key), (PREVIOUS_KEY, &self.previous_key)] {
            if value.trim().is_empty() {
                return Err(PrefError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Parse the `[landmarks]` table of a TOML document. Absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, PrefError> {
        #[derive(Deserialize, Default)]
        struct PrefsFile {
            #[serde(default)]
            landmarks: Configuration,
        }

        let file: PrefsFile = toml::from_str(content)?;
        file.landmarks.validate()?;
        Ok(file.landmarks)
    }

    /// Load a TOML preferences file
    pub fn from_toml_file(path: &Path) -> Result<Self, PrefError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// A stored preference value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
    String(String),
    Bool(bool),
}

/// Read access to preferences plus change notifications for the watched branch
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Result<String, PrefError>;

    fn get_bool(&self, key: &str) -> Result<bool, PrefError>;

    /// Keys (relative to the branch) changed since the last call
    fn take_changes(&mut self) -> Vec<String>;
}

/// In-memory preference tree keyed by full dotted names
#[derive(Debug, Clone)]
pub struct MemoryPreferenceStore {
    branch: String,
    values: HashMap<String, PrefValue>,
    changes: Vec<String>,
}

impl MemoryPreferenceStore {
    /// Empty store watching `branch` (a dotted prefix such as `extensions.landmarks.`)
    pub fn new(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            values: HashMap::new(),
            changes: Vec::new(),
        }
    }

    /// Store pre-populated from a configuration, watching [`PREF_BRANCH`]
    pub fn from_config(config: &Configuration) -> Self {
        let mut store = Self::new(PREF_BRANCH);
        store.write(BORDER_MODE, PrefValue::String(config.border_mode.as_str().to_string()));
        store.write(NEXT_KEY, PrefValue::String(config.next_key.clone()));
        store.write(PREVIOUS_KEY, PrefValue::String(config.previous_key.clone()));
        store.write(SHIFT_MODIFIER, PrefValue::Bool(config.use_shift));
        store.write(CONTROL_MODIFIER, PrefValue::Bool(config.use_control));
        store.changes.clear();
        store
    }

    fn write(&mut self, key: &str, value: PrefValue) {
        let full = format!("{}{}", self.branch, key);
        self.set(&full, value);
    }

    /// Set a preference by its full name. Changes inside the watched branch
    /// are queued for [`PreferenceStore::take_changes`]; writing an identical
    /// value is not a change.
    pub fn set(&mut self, full_key: &str, value: PrefValue) {
        if self.values.get(full_key) == Some(&value) {
            return;
        }
        self.values.insert(full_key.to_string(), value);
        if let Some(key) = full_key.strip_prefix(&self.branch) {
            tracing::debug!("Preference changed: {}", key);
            self.changes.push(key.to_string());
        }
    }

    /// Set a string preference relative to the branch
    pub fn set_string(&mut self, key: &str, value: &str) {
        self.write(key, PrefValue::String(value.to_string()));
    }

    /// Set a boolean preference relative to the branch
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.write(key, PrefValue::Bool(value));
    }

    /// Remove a preference relative to the branch
    pub fn clear(&mut self, key: &str) {
        let full = format!("{}{}", self.branch, key);
        if self.values.remove(&full).is_some() {
            self.changes.push(key.to_string());
        }
    }

    fn lookup(&self, key: &str) -> Result<&PrefValue, PrefError> {
        let full = format!("{}{}", self.branch, key);
        self.values.get(&full).ok_or(PrefError::Missing(full))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_string(&self, key: &str) -> Result<String, PrefError> {
        match self.lookup(key)? {
            PrefValue::String(s) => Ok(s.clone()),
            PrefValue::Bool(_) => Err(PrefError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
            }),
        }
    }

    fn get_bool(&self, key: &str) -> Result<bool, PrefError> {
        match self.lookup(key)? {
            PrefValue::Bool(b) => Ok(*b),
            PrefValue::String(_) => Err(PrefError::TypeMismatch {
                key: key.to_string(),
                expected: "bool",
            }),
        }
    }

    fn take_changes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.changes)
    }
}
