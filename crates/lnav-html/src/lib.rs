//! lnav HTML Parser
//!
//! HTML5 parsing built on html5ever, converted into the arena
//! document tree from `lnav-dom`.

mod parser;

pub use lnav_dom::Document;
pub use parser::HtmlParser;

use std::path::Path;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Read and parse an HTML file. The document URL is the `file://` form of the path.
pub fn parse_file(path: &Path) -> Result<Document, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let html = String::from_utf8_lossy(&bytes);
    let url = format!("file://{}", path.display());
    Ok(HtmlParser::new().parse_with_url(&html, &url))
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
