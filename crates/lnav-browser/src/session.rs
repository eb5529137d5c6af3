//! Session
//!
//! Wires one tab, its landmark navigator and the preference store together.
//! Every trigger (key press, menu, page load, preference change, timer)
//! enters through here with the navigator passed the tab explicitly.

use crate::tab::Tab;
use lnav_a11y::prefs::{CONTROL_MODIFIER, SHIFT_MODIFIER};
use lnav_a11y::{
    startup, Configuration, LandmarkError, LandmarkMenu, LandmarkNavigator, MemoryPreferenceStore, PrefError,
    PrefValue, PreferenceStore,
};
use lnav_dom::Document;

/// A tab with landmark navigation attached
#[derive(Debug)]
pub struct Session {
    tab: Tab,
    navigator: LandmarkNavigator,
    prefs: MemoryPreferenceStore,
}

impl Session {
    /// Start a session. Fails when the store lacks a setting.
    pub fn new(prefs: MemoryPreferenceStore) -> Result<Self, LandmarkError> {
        let mut tab = Tab::new();
        let navigator = startup(&prefs, &mut tab)?;
        tracing::info!("Landmark navigation ready ({})", navigator.config().border_mode);
        Ok(Self { tab, navigator, prefs })
    }

    /// Session with the default settings
    pub fn with_defaults() -> Result<Self, LandmarkError> {
        Self::new(MemoryPreferenceStore::from_config(&Configuration::default()))
    }

    /// Show a new page and rebuild the landmark list
    pub fn load_page(&mut self, document: Document) {
        self.tab.set_document(document);
        self.navigator.on_page_load(&mut self.tab);
        tracing::info!(
            "Loaded {} ({} landmarks)",
            self.tab.url,
            self.navigator.entries().len()
        );
    }

    /// Show a page inside a wrapper window; the navigator reaches it
    /// through the opener
    pub fn load_page_in_opener(&mut self, document: Document) {
        self.tab.clear_document();
        self.tab.set_opener(Some(document));
        self.navigator.on_page_load(&mut self.tab);
    }

    /// Dispatch a key press to the bound action, if any. Returns the focused
    /// landmark index.
    pub fn press_key(&mut self, key: &str, shift: bool, control: bool) -> Result<Option<usize>, LandmarkError> {
        match self.tab.shortcuts().handle_key(key, shift, control) {
            Some(action) => {
                tracing::debug!("Key {} -> {}", key, action.id());
                self.navigator.perform(&mut self.tab, action)
            }
            None => Ok(None),
        }
    }

    pub fn next(&mut self) -> Result<Option<usize>, LandmarkError> {
        self.navigator.next(&mut self.tab)
    }

    pub fn previous(&mut self) -> Result<Option<usize>, LandmarkError> {
        self.navigator.previous(&mut self.tab)
    }

    /// Menu of the current landmark list
    pub fn open_menu(&self) -> LandmarkMenu {
        self.navigator.menu()
    }

    /// Activate the menu item at `position`. The placeholder item of an
    /// empty menu does nothing.
    pub fn activate_menu_item(&mut self, position: usize) -> Result<bool, LandmarkError> {
        let menu = self.open_menu();
        let item = menu.items.get(position).ok_or(LandmarkError::IndexOutOfBounds {
            index: position,
            len: menu.len(),
        })?;
        match item.command {
            Some(command) => {
                self.navigator.activate(&mut self.tab, command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write a preference and deliver the change notification. Returns
    /// whether a new configuration was reflected. A value that leaves the
    /// settings unloadable is rejected and the store keeps its old value.
    pub fn set_preference(&mut self, key: &str, value: PrefValue) -> Result<bool, PrefError> {
        let mut candidate = self.prefs.clone();
        match value {
            PrefValue::String(s) => candidate.set_string(key, &s),
            PrefValue::Bool(b) => candidate.set_bool(key, b),
        }
        if let Err(err) = Configuration::load(&candidate) {
            tracing::warn!("Rejected preference {}: {}", key, err);
            return Err(err);
        }
        self.prefs = candidate;
        self.dispatch_preference_changes()
    }

    /// Write a preference from text, reading the modifier switches as booleans
    pub fn set_preference_str(&mut self, key: &str, raw: &str) -> Result<bool, PrefError> {
        let value = if key == SHIFT_MODIFIER || key == CONTROL_MODIFIER {
            let flag = raw.parse::<bool>().map_err(|_| PrefError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            })?;
            PrefValue::Bool(flag)
        } else {
            PrefValue::String(raw.to_string())
        };
        self.set_preference(key, value)
    }

    fn dispatch_preference_changes(&mut self) -> Result<bool, PrefError> {
        let changes = self.prefs.take_changes();
        if changes.is_empty() {
            return Ok(false);
        }
        tracing::debug!("Preferences changed: {:?}", changes);
        let config = Configuration::load(&self.prefs)?;
        self.navigator.on_configuration_changed(&mut self.tab, &config);
        Ok(true)
    }

    /// Advance the tab clock and run whatever came due. Returns the number
    /// of tasks run.
    pub fn advance_time(&mut self, ms: u64) -> usize {
        let due = self.tab.timers.tick(ms);
        let count = due.len();
        for task in due {
            self.navigator.run_task(&mut self.tab, task);
        }
        count
    }

    /// Menu text of the focused landmark
    pub fn focused_label(&self) -> Option<String> {
        self.navigator.focused_entry().map(|e| e.display_label())
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    pub fn navigator(&self) -> &LandmarkNavigator {
        &self.navigator
    }

    pub fn preferences(&self) -> &MemoryPreferenceStore {
        &self.prefs
    }
}
