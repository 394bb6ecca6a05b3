//! Cloud document editor pages.
//!
//! Two strategies exist and exactly one is active per invocation:
//! [`DocumentStrategy::Export`] asks the editor for a plain-text export from
//! inside the tab's own origin, [`DocumentStrategy::Dom`] scrapes the
//! rendered editor instead.

use crate::error::ExtractionError;
use crate::extract::page::Tab;
use crate::extract::text::{parse_selector, rendered_text, select_first};
use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

pub const DOC_ID_PATTERN: &str = r"docs\.google\.com/document/d/([A-Za-z0-9_-]+)";

const RENDER_CONTAINER: &str = ".kix-appview-editor, .doc-content";
const MODEL_MARKER: &str = "DOCS_modelChunk";
const MODEL_STRING: &str = r#""s":"((?:[^"\\]|\\.)*)""#;
const PAGE_CONTAINER: &str = ".kix-page, .kix-page-paginated";

static DOC_ID: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(DOC_ID_PATTERN).ok());
static MODEL_STRINGS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(MODEL_STRING).ok());

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStrategy {
    /// Fetch the plain-text export with the tab's session.
    #[default]
    Export,
    /// Scrape the editor DOM.
    Dom,
}

/// Document id embedded in an editor URL.
pub fn document_id(url: &str) -> Option<String> {
    DOC_ID
        .as_ref()?
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

pub fn export_path(id: &str) -> String {
    format!("/document/d/{id}/export?format=txt")
}

pub fn matches(url: &Url) -> bool {
    document_id(url.as_str()).is_some()
}

/// Plain-text export of document `id`, trimmed, fetched through `tab`.
pub async fn fetch_export(tab: &dyn Tab, id: &str) -> Result<String, ExtractionError> {
    let text = tab.fetch_same_origin(&export_path(id)).await?;
    tracing::debug!(doc_id = id, bytes = text.len(), "document export fetched");
    Ok(text.trim().to_string())
}

/// DOM-scraping fallback: rendering container, then the embedded content
/// model, then paginated page containers.
pub fn extract_dom(document: &Html) -> Option<String> {
    container_text(document)
        .or_else(|| model_text(document))
        .or_else(|| paginated_text(document))
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn container_text(document: &Html) -> Option<String> {
    let container = select_first(document, RENDER_CONTAINER)?;
    non_empty(&rendered_text(container))
}

fn unescape_literal(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}

/// Inline scripts that carry the editor's content model, decoded.
fn model_text(document: &Html) -> Option<String> {
    let scripts = parse_selector("script")?;
    let strings = MODEL_STRINGS.as_ref()?;

    let mut text = String::new();
    for script in document.select(&scripts) {
        let source: String = script.text().collect();
        if !source.contains(MODEL_MARKER) {
            continue;
        }
        for caps in strings.captures_iter(&source) {
            if let Some(raw) = caps.get(1) {
                text.push_str(&unescape_literal(raw.as_str()));
            }
        }
    }
    non_empty(&text)
}

fn paginated_text(document: &Html) -> Option<String> {
    let pages = parse_selector(PAGE_CONTAINER)?;
    let text = document
        .select(&pages)
        .map(rendered_text)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    non_empty(&text)
}
