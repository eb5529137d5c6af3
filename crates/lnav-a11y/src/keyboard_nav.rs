//! Landmark Keyboard Navigation
//!
//! Key bindings for the next/previous landmark actions and the registry the
//! host uses to dispatch key presses.

use crate::prefs::Configuration;

/// Navigation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    NextLandmark,
    PreviousLandmark,
}

impl NavAction {
    /// Stable binding id
    pub fn id(self) -> &'static str {
        match self {
            Self::NextLandmark => "nextLandmark",
            Self::PreviousLandmark => "previousLandmark",
        }
    }
}

/// Space-separated modifier list, shift first. `None` when no modifier is set.
pub fn modifier_string(shift: bool, control: bool) -> Option<String> {
    let mut parts = Vec::new();
    if shift {
        parts.push("shift");
    }
    if control {
        parts.push("control");
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// One key binding: key character, optional modifiers, and the bound action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub action: NavAction,
    pub key: String,
    pub modifiers: Option<String>,
}

impl KeyBinding {
    pub fn id(&self) -> &'static str {
        self.action.id()
    }

    fn has_modifier(&self, name: &str) -> bool {
        self.modifiers
            .as_deref()
            .is_some_and(|m| m.split_whitespace().any(|t| t == name))
    }

    /// Whether a key press triggers this binding. The key compares
    /// case-insensitively; the modifier set must match exactly.
    pub fn matches(&self, key: &str, shift: bool, control: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.has_modifier("shift") == shift
            && self.has_modifier("control") == control
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.has_modifier("control") {
            parts.push("Ctrl");
        }
        if self.has_modifier("shift") {
            parts.push("Shift");
        }
        parts.push(&self.key);
        parts.join("+")
    }
}

/// The next/previous binding pair, always replaced as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    pub next: KeyBinding,
    pub previous: KeyBinding,
}

impl KeySet {
    pub fn from_config(config: &Configuration) -> Self {
        let modifiers = modifier_string(config.use_shift, config.use_control);
        Self {
            next: KeyBinding {
                action: NavAction::NextLandmark,
                key: config.next_key.clone(),
                modifiers: modifiers.clone(),
            },
            previous: KeyBinding {
                action: NavAction::PreviousLandmark,
                key: config.previous_key.clone(),
                modifiers,
            },
        }
    }

    pub fn bindings(&self) -> [&KeyBinding; 2] {
        [&self.next, &self.previous]
    }
}

/// Host-side binding surface
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    keyset: Option<KeySet>,
    generation: u64,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new key set. The old set is dropped before the new one is
    /// attached, so at no point are both active.
    pub fn replace_keyset(&mut self, keyset: KeySet) {
        drop(self.keyset.take());
        self.generation += 1;
        tracing::debug!(
            "Key bindings v{}: next={} previous={}",
            self.generation,
            keyset.next.display(),
            keyset.previous.display()
        );
        self.keyset = Some(keyset);
    }

    /// Active bindings
    pub fn bindings(&self) -> Vec<&KeyBinding> {
        self.keyset
            .as_ref()
            .map(|k| k.bindings().to_vec())
            .unwrap_or_default()
    }

    /// How many times the key set was replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Action bound to a key press. When next and previous share a key,
    /// next wins.
    pub fn handle_key(&self, key: &str, shift: bool, control: bool) -> Option<NavAction> {
        self.bindings()
            .into_iter()
            .find(|b| b.matches(key, shift, control))
            .map(|b| b.action)
    }
}
