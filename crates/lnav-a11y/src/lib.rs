//! lnav Accessibility
//!
//! Landmark discovery and keyboard navigation for the landmark navigator.
//!
//! Features:
//! - ARIA role resolution with implicit HTML roles
//! - Accessible labels (aria-label / aria-labelledby)
//! - Nesting-aware landmark scanning
//! - Cyclic focus navigation with outline highlight
//! - Preference-driven key bindings

pub mod aria;
pub mod focus;
pub mod keyboard_nav;
pub mod label;
pub mod menu;
pub mod navigator;
pub mod prefs;
pub mod reflector;
pub mod scanner;
pub mod timers;

pub use aria::{resolve_role, AriaRole, LandmarkTag};
pub use focus::{focus_programmatically, remove_highlight, FocusIndicator};
pub use keyboard_nav::{modifier_string, KeyBinding, KeySet, NavAction, ShortcutRegistry};
pub use label::get_label;
pub use menu::{LandmarkMenu, MenuCommand, MenuItem, NO_LANDMARKS_LABEL};
pub use navigator::{resolve_document, LandmarkNavigator, NavigationState, PageHost};
pub use prefs::{BorderMode, Configuration, MemoryPreferenceStore, PrefError, PrefValue, PreferenceStore};
pub use reflector::{reflect_preferences, startup};
pub use scanner::{scan, scan_document, LandmarkEntry};
pub use timers::{DeferredTask, TimerId, TimerQueue, MOMENTARY_HIGHLIGHT_MS};

/// Landmark navigation error
#[derive(Debug, thiserror::Error)]
pub enum LandmarkError {
    #[error("Landmark index {index} out of bounds (have {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Preferences: {0}")]
    Preferences(#[from] PrefError),

    #[error("Document: {0}")]
    Dom(#[from] lnav_dom::DomError),
}
