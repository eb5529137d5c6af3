//! Preference Reflector
//!
//! Applies a new configuration to the live page: highlight state of the
//! focused landmark and the navigation key bindings.

use crate::focus::remove_highlight;
use crate::keyboard_nav::KeySet;
use crate::navigator::{resolve_document, LandmarkNavigator, PageHost};
use crate::prefs::{BorderMode, Configuration, PreferenceStore};
use crate::LandmarkError;

/// React to a configuration change. Runs in full on every notification,
/// whichever setting changed.
pub fn reflect_preferences<H: PageHost + ?Sized>(
    navigator: &mut LandmarkNavigator,
    host: &mut H,
    config: &Configuration,
) {
    navigator.set_config(config.clone());
    // The highlight state is settled below, so no earlier removal may undo it
    navigator.cancel_pending_removal(host);

    if let Some(node) = navigator.focused_node() {
        if let Some(doc) = resolve_document(host) {
            let tree = doc.tree_mut();
            if config.border_mode == BorderMode::Persistent {
                if let Err(err) = navigator.indicator().apply(tree, node) {
                    tracing::warn!("Could not highlight focused landmark: {}", err);
                }
            } else {
                remove_highlight(tree, node);
            }
        }
    }

    host.replace_key_bindings(KeySet::from_config(config));
    tracing::debug!(
        "Reflected preferences: border={} next={} previous={}",
        config.border_mode,
        config.next_key,
        config.previous_key
    );
}

/// Load the configuration and build a navigator with its key bindings
/// registered. A store that cannot supply the settings is fatal.
pub fn startup<H: PageHost + ?Sized>(
    store: &dyn PreferenceStore,
    host: &mut H,
) -> Result<LandmarkNavigator, LandmarkError> {
    let config = Configuration::load(store)?;
    let mut navigator = LandmarkNavigator::new(config.clone());
    reflect_preferences(&mut navigator, host, &config);
    Ok(navigator)
}

impl LandmarkNavigator {
    /// Configuration-change entry point for the preference subscription
    pub fn on_configuration_changed<H: PageHost + ?Sized>(&mut self, host: &mut H, config: &Configuration) {
        reflect_preferences(self, host, config);
    }
}
