use super::text::{parse_selector, rendered_text};
use crate::utils::word_count;
use scraper::ElementRef;

/// Block elements considered as content candidates.
pub const CANDIDATE_SELECTOR: &str = "article, main, [role='main'], section, div";
/// A candidate needs strictly more words than this to be eligible.
pub const MIN_WORDS: usize = 80;
/// Character length contributes at most this much (divided by 10).
pub const LENGTH_CAP: usize = 2000;

/// `wordCount + min(LENGTH_CAP, charLength) / 10`.
#[allow(clippy::cast_precision_loss)]
pub fn score(words: usize, chars: usize) -> f64 {
    words as f64 + chars.min(LENGTH_CAP) as f64 / 10.0
}

/// Score of `text` if it is eligible, `None` otherwise.
pub fn eligible_score(text: &str) -> Option<f64> {
    let words = word_count(text);
    (words > MIN_WORDS).then(|| score(words, text.chars().count()))
}

/// Index of the highest-scoring eligible text. Ties keep the earliest.
pub fn best_candidate<S: AsRef<str>>(texts: &[S]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, text) in texts.iter().enumerate() {
        let Some(candidate) = eligible_score(text.as_ref()) else {
            continue;
        };
        if best.is_none_or(|(_, top)| candidate > top) {
            best = Some((idx, candidate));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Text of the best candidate block under `root`, or all of `root`'s text
/// when no candidate qualifies.
pub fn pick_best_text(root: ElementRef<'_>) -> String {
    let Some(selector) = parse_selector(CANDIDATE_SELECTOR) else {
        return rendered_text(root);
    };

    let texts: Vec<String> = root
        .select(&selector)
        .map(|el| rendered_text(el).trim().to_string())
        .collect();

    match best_candidate(&texts) {
        Some(idx) => {
            tracing::debug!(
                candidates = texts.len(),
                winner = idx,
                "generic scorer picked candidate"
            );
            texts.into_iter().nth(idx).unwrap_or_default()
        }
        None => rendered_text(root),
    }
}
