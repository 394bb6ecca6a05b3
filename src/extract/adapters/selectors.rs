//! Collaboration tools whose content sits under a single well-known element.

use crate::extract::text::{rendered_text, select_first};
use scraper::Html;
use url::Url;

pub const HOSTS: &[&str] = &["notes.granola.ai", "www.notion.so"];

/// First match in document order wins.
pub const PRIMARY_CONTENT: &str = "main, [role='main'], article";

pub fn matches(url: &Url) -> bool {
    url.host_str().is_some_and(|host| HOSTS.contains(&host))
}

pub fn extract(document: &Html) -> Option<String> {
    let element = select_first(document, PRIMARY_CONTENT)?;
    let text = rendered_text(element).trim().to_string();
    (!text.is_empty()).then_some(text)
}
