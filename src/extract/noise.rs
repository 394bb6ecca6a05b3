use super::text::{parse_selector, select_first};
use scraper::{ElementRef, Html};

/// Subtrees that never carry page content: scripts, layout chrome,
/// interactive controls, embeds, and anything flagged as ads or navigation.
pub const NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "nav",
    "footer",
    "header",
    "aside",
    "form",
    "button",
    "input",
    "textarea",
    "svg",
    "canvas",
    "iframe",
    "[role='navigation']",
    "[role='banner']",
    "[role='contentinfo']",
    "[aria-hidden='true']",
    ".ad",
    ".ads",
    ".advert",
    ".advertisement",
    ".promo",
    ".subscribe",
    ".newsletter",
];

/// Return a copy of `document` with every denylisted subtree removed.
///
/// The input is never touched; callers keep scoring the clone while the
/// original stays available for fallbacks.
#[must_use]
pub fn strip_noise(document: &Html) -> Html {
    let mut clone = document.clone();
    remove_matching(&mut clone, None, NOISE_SELECTORS);
    clone
}

/// Detach every element matching any of `selectors`.
///
/// With `scope` set, only descendants of the first element matching that
/// selector are considered, and nothing is removed if it matches nothing.
/// Returns how many subtrees were detached.
pub(crate) fn remove_matching(
    document: &mut Html,
    scope: Option<&str>,
    selectors: &[&str],
) -> usize {
    let scope_id = match scope {
        Some(css) => match select_first(document, css) {
            Some(el) => Some(el.id()),
            None => return 0,
        },
        None => None,
    };
    let mut removed = 0;

    for css in selectors {
        let Some(selector) = parse_selector(css) else {
            tracing::debug!(selector = css, "skipping unparsable noise selector");
            continue;
        };

        let ids: Vec<_> = match scope_id.and_then(|id| document.tree.get(id)) {
            Some(node) => ElementRef::wrap(node)
                .map(|el| el.select(&selector).map(|m| m.id()).collect())
                .unwrap_or_default(),
            None if scope_id.is_some() => Vec::new(),
            None => document.select(&selector).map(|m| m.id()).collect(),
        };

        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
    }

    removed
}
