use super::adapters::{self, DocumentStrategy, SiteAdapter, document};
use super::noise::strip_noise;
use super::page::{PageSnapshot, Tab};
use super::scorer::pick_best_text;
use super::text::{body_or_root, document_title, rendered_text};
use crate::error::ExtractionError;
use crate::utils::normalize_whitespace;
use scraper::Html;
use serde::{Deserialize, Serialize};

const UNTITLED: &str = "Untitled";
const DOCUMENT_TITLE_FALLBACK: &str = "Google Doc";

/// What a page boiled down to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub url: String,
    pub title: String,
    pub selection: String,
    pub content: String,
}

/// Per-invocation extraction choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub document_strategy: DocumentStrategy,
}

/// Where the content of a page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Adapter(&'static str),
    Generic,
    BodyFallback,
}

/// Pure extraction over a snapshot; runs no I/O and touches nothing but
/// its arguments. Text is returned as rendered, without normalization.
pub fn extract_page(
    snapshot: &PageSnapshot,
    adapters: &[SiteAdapter],
) -> (ExtractionResult, ContentSource) {
    scrape(snapshot, adapters, "")
}

/// `tab_title` stands in for a missing `<title>` before `Untitled` does.
fn scrape(
    snapshot: &PageSnapshot,
    adapters: &[SiteAdapter],
    tab_title: &str,
) -> (ExtractionResult, ContentSource) {
    let page = Html::parse_document(&snapshot.html);
    let title = match (document_title(&page), tab_title.trim()) {
        (title, _) if !title.is_empty() => title,
        (_, "") => UNTITLED.to_string(),
        (_, tab_title) => tab_title.to_string(),
    };

    let (content, source) = match adapters::run_adapters(adapters, &snapshot.url, &page) {
        Some((name, text)) => (text, ContentSource::Adapter(name)),
        None => generic_content(&page),
    };

    let result = ExtractionResult {
        url: snapshot.url.clone(),
        title,
        selection: snapshot.selection.trim().to_string(),
        content,
    };
    (result, source)
}

fn generic_content(page: &Html) -> (String, ContentSource) {
    let filtered = strip_noise(page);
    let best = pick_best_text(body_or_root(&filtered));
    if best.is_empty() {
        (rendered_text(body_or_root(page)), ContentSource::BodyFallback)
    } else {
        (best, ContentSource::Generic)
    }
}

/// Extract the content of `tab`.
///
/// Document-editor URLs under [`DocumentStrategy::Export`] are fetched as
/// plain text and kept verbatim; every other path is scraped from a snapshot
/// and whitespace-normalized. Only the tab capability can fail.
pub async fn extract(
    tab: &dyn Tab,
    options: ExtractOptions,
) -> Result<ExtractionResult, ExtractionError> {
    if options.document_strategy == DocumentStrategy::Export
        && let Some(doc_id) = document::document_id(tab.url())
    {
        let content = document::fetch_export(tab, &doc_id).await?;
        let selection = tab.selection().await;
        let title = match tab.title().trim() {
            "" => DOCUMENT_TITLE_FALLBACK.to_string(),
            title => title.to_string(),
        };
        tracing::info!(doc_id = %doc_id, chars = content.len(), "extracted document export");
        return Ok(ExtractionResult {
            url: tab.url().to_string(),
            title,
            selection: normalize_whitespace(&selection),
            content,
        });
    }

    let snapshot = tab.snapshot().await?;
    let adapters = adapters::registry(options.document_strategy);
    let (raw, source) = scrape(&snapshot, &adapters, tab.title());
    tracing::info!(url = %raw.url, ?source, chars = raw.content.len(), "extracted page");

    Ok(ExtractionResult {
        content: normalize_whitespace(&raw.content),
        selection: normalize_whitespace(&raw.selection),
        ..raw
    })
}
