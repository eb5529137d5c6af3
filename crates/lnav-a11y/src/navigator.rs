//! Landmark Navigator
//!
//! Owns the landmark collection of one page view and moves keyboard focus
//! through it cyclically, drawing the configured highlight.

use crate::focus::{focus_programmatically, remove_highlight, FocusIndicator};
use crate::keyboard_nav::{KeySet, NavAction};
use crate::menu::{LandmarkMenu, MenuCommand};
use crate::prefs::{BorderMode, Configuration};
use crate::scanner::{scan_document, LandmarkEntry};
use crate::timers::{DeferredTask, TimerId, MOMENTARY_HIGHLIGHT_MS};
use crate::LandmarkError;
use lnav_dom::{Document, NodeId};

/// What the navigator needs from the page it runs in
pub trait PageHost {
    /// Document of the displayed page
    fn content_document(&mut self) -> Option<&mut Document>;

    /// Document reached through the hosting window when the navigator runs
    /// inside a wrapper (e.g. a sidebar or detached menu)
    fn opener_document(&mut self) -> Option<&mut Document> {
        None
    }

    /// Schedule fire-and-forget work; the host hands it back to
    /// [`LandmarkNavigator::run_task`] when due
    fn set_timeout(&mut self, task: DeferredTask, delay_ms: u64) -> TimerId;

    /// Cancel work scheduled with [`PageHost::set_timeout`]. Ids that
    /// already fired are ignored.
    fn clear_timeout(&mut self, id: TimerId);

    /// Atomically replace the next/previous key bindings
    fn replace_key_bindings(&mut self, keyset: KeySet);
}

/// The current page document, falling back to the opener's
pub fn resolve_document<H: PageHost + ?Sized>(host: &mut H) -> Option<&mut Document> {
    if host.content_document().is_some() {
        return host.content_document();
    }
    host.opener_document()
}

/// Selection state, reset whenever the collection is rebuilt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub selected_index: usize,
    /// Index of the landmark focused last, if any
    pub previous_selected_index: Option<usize>,
}

/// Landmark navigator for one page view
#[derive(Debug)]
pub struct LandmarkNavigator {
    entries: Vec<LandmarkEntry>,
    state: NavigationState,
    config: Configuration,
    indicator: FocusIndicator,
    /// Bumped per page load so deferred work never touches a newer page
    page: u64,
    /// Outstanding momentary highlight removal
    pending_removal: Option<TimerId>,
}

impl LandmarkNavigator {
    pub fn new(config: Configuration) -> Self {
        Self {
            entries: Vec::new(),
            state: NavigationState::default(),
            config,
            indicator: FocusIndicator::default(),
            page: 0,
            pending_removal: None,
        }
    }

    /// Rescan the current document, replacing the collection and resetting selection
    pub fn rebuild<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        self.entries = match resolve_document(host) {
            Some(doc) => scan_document(doc),
            None => {
                tracing::warn!("No document available; landmark list is empty");
                Vec::new()
            }
        };
        self.state = NavigationState::default();
        tracing::debug!("Rebuilt landmark list: {} entries", self.entries.len());
    }

    /// A new page was loaded into the host
    pub fn on_page_load<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        self.page += 1;
        self.cancel_pending_removal(host);
        self.state.previous_selected_index = None;
        self.rebuild(host);
    }

    /// Focus the landmark after the last focused one, wrapping around.
    /// Returns the focused index, or `None` when the page has no landmarks.
    pub fn next<H: PageHost + ?Sized>(&mut self, host: &mut H) -> Result<Option<usize>, LandmarkError> {
        if !self.ensure_entries(host) {
            return Ok(None);
        }
        let count = self.entries.len();
        let index = self
            .state
            .previous_selected_index
            .map_or(0, |prev| (prev + 1) % count);
        self.focus(host, index)?;
        Ok(Some(index))
    }

    /// Focus the landmark before the last focused one, wrapping around
    pub fn previous<H: PageHost + ?Sized>(&mut self, host: &mut H) -> Result<Option<usize>, LandmarkError> {
        if !self.ensure_entries(host) {
            return Ok(None);
        }
        let count = self.entries.len();
        let index = match self.state.previous_selected_index {
            None | Some(0) => count - 1,
            Some(prev) => (prev - 1).min(count - 1),
        };
        self.focus(host, index)?;
        Ok(Some(index))
    }

    fn ensure_entries<H: PageHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.entries.is_empty() {
            self.rebuild(host);
        }
        if self.entries.is_empty() {
            tracing::debug!("No landmarks to navigate");
            return false;
        }
        true
    }

    /// Run a bound key action
    pub fn perform<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        action: NavAction,
    ) -> Result<Option<usize>, LandmarkError> {
        match action {
            NavAction::NextLandmark => self.next(host),
            NavAction::PreviousLandmark => self.previous(host),
        }
    }

    /// Run a menu item's command
    pub fn activate<H: PageHost + ?Sized>(
        &mut self,
        host: &mut H,
        command: MenuCommand,
    ) -> Result<(), LandmarkError> {
        match command {
            MenuCommand::Focus(index) => self.focus(host, index),
        }
    }

    /// Move focus to the landmark at `index`.
    ///
    /// An index outside the current collection is a caller bug (usually an
    /// index kept across a rebuild) and is reported, never clamped.
    pub fn focus<H: PageHost + ?Sized>(&mut self, host: &mut H, index: usize) -> Result<(), LandmarkError> {
        let len = self.entries.len();
        let target = self
            .entries
            .get(index)
            .map(|e| e.node)
            .ok_or(LandmarkError::IndexOutOfBounds { index, len })?;
        let previous = self.focused_node();
        let mode = self.config.border_mode;
        self.state.selected_index = index;
        // A removal scheduled for an earlier focus must not clear this one
        self.cancel_pending_removal(host);

        let Some(doc) = resolve_document(host) else {
            tracing::warn!("No document available; cannot focus landmark {}", index);
            return Ok(());
        };
        let tree = doc.tree_mut();

        if mode.highlights() {
            if let Some(prev) = previous {
                remove_highlight(tree, prev);
            }
        }

        if !focus_programmatically(tree, target)? {
            tracing::debug!("Landmark {} ({}) did not take focus", index, target);
        }

        if mode.highlights() {
            self.indicator.apply(tree, target)?;
        }

        self.state.previous_selected_index = Some(index);

        if mode == BorderMode::Momentary {
            let task = DeferredTask::RemoveHighlight {
                node: target,
                page: self.page,
            };
            self.pending_removal = Some(host.set_timeout(task, MOMENTARY_HIGHLIGHT_MS));
        }

        tracing::debug!("Focused landmark {} of {}", index, len);
        Ok(())
    }

    /// Execute a deferred task that came due
    pub fn run_task<H: PageHost + ?Sized>(&mut self, host: &mut H, task: DeferredTask) {
        match task {
            DeferredTask::RemoveHighlight { node, page } => {
                if page != self.page {
                    tracing::trace!("Dropping highlight removal from page {}", page);
                    return;
                }
                self.pending_removal = None;
                if let Some(doc) = resolve_document(host) {
                    remove_highlight(doc.tree_mut(), node);
                }
            }
        }
    }

    /// Node of the landmark focused last
    pub fn focused_node(&self) -> Option<NodeId> {
        self.focused_entry().map(|e| e.node)
    }

    pub fn focused_entry(&self) -> Option<&LandmarkEntry> {
        self.state
            .previous_selected_index
            .and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[LandmarkEntry] {
        &self.entries
    }

    /// Menu text of every landmark, in document order
    pub fn display_labels(&self) -> Vec<String> {
        self.entries.iter().map(LandmarkEntry::display_label).collect()
    }

    pub fn menu(&self) -> LandmarkMenu {
        LandmarkMenu::from_entries(&self.entries)
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Drop the outstanding momentary removal, if any
    pub(crate) fn cancel_pending_removal<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.pending_removal.take() {
            tracing::trace!("Cancelled highlight removal {:?}", id);
            host.clear_timeout(id);
        }
    }

    pub(crate) fn set_config(&mut self, config: Configuration) {
        self.config = config;
    }

    pub(crate) fn indicator(&self) -> &FocusIndicator {
        &self.indicator
    }
}
