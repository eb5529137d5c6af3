//! Shared test host

#![allow(dead_code)]

use lnav_a11y::{DeferredTask, KeySet, LandmarkNavigator, PageHost, ShortcutRegistry, TimerId, TimerQueue};
use lnav_dom::Document;
use lnav_html::HtmlParser;

/// Minimal page host: one document, a virtual clock and a binding registry
pub struct TestHost {
    pub document: Option<Document>,
    pub opener: Option<Document>,
    pub timers: TimerQueue,
    pub shortcuts: ShortcutRegistry,
}

impl TestHost {
    pub fn new(document: Document) -> Self {
        Self {
            document: Some(document),
            opener: None,
            timers: TimerQueue::new(),
            shortcuts: ShortcutRegistry::new(),
        }
    }

    pub fn from_html(html: &str) -> Self {
        Self::new(HtmlParser::new().parse(html))
    }

    pub fn doc(&self) -> &Document {
        self.document
            .as_ref()
            .or(self.opener.as_ref())
            .expect("test host has a document")
    }

    /// Advance the clock and run due tasks through the navigator
    pub fn advance(&mut self, navigator: &mut LandmarkNavigator, ms: u64) {
        for task in self.timers.tick(ms) {
            navigator.run_task(self, task);
        }
    }
}

impl PageHost for TestHost {
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

pub const SAMPLE_PAGE: &str = r#"
<!DOCTYPE html>
<html>
  <head><title>Sample</title></head>
  <body>
    <header>Site header</header>
    <nav aria-label="Primary">
      <a href="/">Home</a>
    </nav>
    <main>
      <section aria-labelledby="news-title">
        <header><h2 id="news-title">News</h2></header>
        <div role="region" aria-label="Headlines"></div>
      </section>
      <article>
        <footer>Posted today</footer>
      </article>
      <aside tabindex="0">Related</aside>
    </main>
    <div role="search"><form role="form"></form></div>
    <footer>Site footer</footer>
  </body>
</html>
"#;
