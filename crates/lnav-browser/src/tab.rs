//! Tab
//!
//! The page view the navigator runs in: the displayed document, the window
//! that opened it, a virtual clock and the key binding surface.

use lnav_a11y::{DeferredTask, KeySet, PageHost, ShortcutRegistry, TimerId, TimerQueue};
use lnav_dom::Document;

/// A browser tab
#[derive(Debug, Default)]
pub struct Tab {
    /// Current URL
    pub url: String,
    /// Page title
    pub title: String,
    document: Option<Document>,
    opener: Option<Document>,
    pub(crate) timers: TimerQueue,
    shortcuts: ShortcutRegistry,
}

impl Tab {
    /// Create an empty tab
    pub fn new() -> Self {
        Self {
            url: "about:blank".to_string(),
            title: "New Tab".to_string(),
            ..Self::default()
        }
    }

    /// Replace the displayed document
    pub fn set_document(&mut self, document: Document) {
        self.url = document.url().to_string();
        let title = document.title();
        self.title = if title.is_empty() { self.url.clone() } else { title };
        self.document = Some(document);
    }

    /// Drop the displayed document, leaving only the opener (if any)
    pub fn clear_document(&mut self) -> Option<Document> {
        self.document.take()
    }

    /// Set the document of the window that opened this tab
    pub fn set_opener(&mut self, document: Option<Document>) {
        self.opener = document;
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn opener(&self) -> Option<&Document> {
        self.opener.as_ref()
    }

    /// Document the navigator works on
    pub fn active_document(&self) -> Option<&Document> {
        self.document.as_ref().or(self.opener.as_ref())
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        &self.shortcuts
    }

    /// Milliseconds on the tab's clock
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.timers.has_pending()
    }
}

impl PageHost for Tab {
    fn content_document(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    fn opener_document(&mut self) -> Option<&mut Document> {
        self.opener.as_mut()
    }

    fn set_timeout(&mut self, task: DeferredTask, delay_ms: u64) -> TimerId {
        self.timers.set_timeout(task, delay_ms)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.clear_timer(id);
    }

    fn replace_key_bindings(&mut self, keyset: KeySet) {
        self.shortcuts.replace_keyset(keyset);
    }
}
