//! Per-site overrides tried before the generic scorer.
//!
//! Adapters form a priority-ordered registry. Each one pairs a URL matcher
//! with an extractor over the parsed page; the first adapter that matches
//! and returns text wins.

pub mod document;
pub mod selectors;
pub mod thread;

pub use document::DocumentStrategy;

use scraper::Html;
use url::Url;

/// One site-specific extraction strategy.
#[derive(Clone, Copy)]
pub struct SiteAdapter {
    pub name: &'static str,
    pub matches: fn(&Url) -> bool,
    pub extract: fn(&Html) -> Option<String>,
}

impl std::fmt::Debug for SiteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteAdapter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub const THREAD_VIEWER: SiteAdapter = SiteAdapter {
    name: "thread-viewer",
    matches: thread::matches,
    extract: thread::extract,
};

pub const DOCUMENT_DOM: SiteAdapter = SiteAdapter {
    name: "document-dom",
    matches: document::matches,
    extract: document::extract_dom,
};

pub const FIXED_SELECTOR: SiteAdapter = SiteAdapter {
    name: "fixed-selector",
    matches: selectors::matches,
    extract: selectors::extract,
};

/// Adapters in priority order for the given document strategy.
///
/// With [`DocumentStrategy::Export`] the document adapter runs outside the
/// page (see [`document::fetch_export`]) and is left out of the registry.
pub fn registry(strategy: DocumentStrategy) -> Vec<SiteAdapter> {
    let mut adapters = Vec::with_capacity(3);
    if strategy == DocumentStrategy::Dom {
        adapters.push(DOCUMENT_DOM);
    }
    adapters.push(THREAD_VIEWER);
    adapters.push(FIXED_SELECTOR);
    adapters
}

/// Run `adapters` in order against `document`, returning the first
/// non-empty result along with the adapter that produced it.
pub fn run_adapters(
    adapters: &[SiteAdapter],
    url: &str,
    document: &Html,
) -> Option<(&'static str, String)> {
    let url = Url::parse(url).ok()?;
    adapters
        .iter()
        .filter(|adapter| (adapter.matches)(&url))
        .find_map(|adapter| {
            let text = (adapter.extract)(document).filter(|text| !text.is_empty())?;
            Some((adapter.name, text))
        })
}
