//! Parsed documents.
//!
//! A [`Document`] is the parsed HTML tree of a fetched page, annotated with the
//! URL it was finally served from and the charset it was decoded from.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

/// Where a document came from and how it was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    /// Absolute URL after redirects.
    pub url: Url,
    /// Lower-cased charset the body was converted from, if one was resolved.
    pub encoding: Option<String>,
}

/// Turns decoded page text into an HTML tree.
pub trait DocumentParser: Send + Sync {
    fn load(&self, text: &str) -> Html;
}

/// `scraper`/html5ever document parser.
///
/// html5ever always decodes character references inside the tree. The raw
/// markup, entities included, stays available through [`Document::source`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperParser;

impl DocumentParser for ScraperParser {
    fn load(&self, text: &str) -> Html {
        Html::parse_document(text)
    }
}

/// A parsed page plus its [`DocumentInfo`].
#[derive(Debug)]
pub struct Document {
    html: Html,
    source: String,
    info: DocumentInfo,
}

impl Document {
    pub(crate) fn new(html: Html, source: String, info: DocumentInfo) -> Self {
        Self { html, source, info }
    }

    /// Parses `text` with `parser` and attaches `info`.
    pub fn load(parser: &dyn DocumentParser, text: &str, info: DocumentInfo) -> Self {
        Self::new(parser.load(text), text.to_string(), info)
    }

    pub fn document_info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn url(&self) -> &Url {
        &self.info.url
    }

    pub fn encoding(&self) -> Option<&str> {
        self.info.encoding.as_deref()
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The decoded markup the tree was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Elements matching a CSS selector, or `None` if the selector is invalid.
    pub fn select(&self, css: &str) -> Option<Vec<ElementRef<'_>>> {
        let selector = Selector::parse(css).ok()?;
        Some(self.html.select(&selector).collect())
    }

    /// Trimmed text of the first `<title>` element.
    pub fn title(&self) -> Option<String> {
        self.select("title")?
            .first()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// Resolves `href` against the document URL.
    pub fn resolve(&self, href: &str) -> Option<Url> {
        self.info.url.join(href).ok()
    }
}
