//! Thread viewer pages (x.com and its aliases).
//!
//! Prefer the primary column with its sidebars and controls stripped. When
//! that yields too little text, fall back to stitching the thread together
//! post by post.

use crate::extract::noise::remove_matching;
use crate::extract::text::{parse_selector, rendered_text, select_first};
use crate::utils::char_prefix;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use url::Url;

pub const HOSTS: &[&str] = &["x.com", "twitter.com", "mobile.x.com", "mobile.twitter.com"];

const PRIMARY_COLUMN: &str = r#"div[data-testid="primaryColumn"]"#;

const COLUMN_NOISE: &[&str] = &[
    r#"[data-testid="sidebarColumn"]"#,
    r#"[role="complementary"]"#,
    r#"a[href="/explore"]"#,
    r#"[data-testid="trend"]"#,
    r#"[data-testid="UserCell"]"#,
    "button",
    "input",
    "textarea",
    "svg",
    r#"[role="button"]"#,
    r#"[data-testid="toolBar"]"#,
    r#"[data-testid="replyButton"]"#,
    r#"[data-testid="retweetButton"]"#,
    r#"[data-testid="likeButton"]"#,
    r#"[data-testid="shareButton"]"#,
];

/// Column text must be longer than this to be accepted.
const MIN_COLUMN_CHARS: usize = 50;

const POST: &str = r#"article[data-testid="tweet"]"#;
const PRIMARY_POST: &str = r#"article[data-testid="tweet"][tabindex="-1"]"#;
const POST_AUTHOR: &str = r#"div[data-testid="User-Name"]"#;
const POST_TEXT: &str = r#"div[data-testid="tweetText"]"#;

/// Posts are considered duplicates when author and this many leading
/// characters of text agree.
pub const DEDUP_PREFIX_CHARS: usize = 80;
pub const QUOTE_MARKER: &str = ">>> ";
pub const POST_SEPARATOR: &str = "\n\n---\n\n";

pub fn matches(url: &Url) -> bool {
    url.host_str().is_some_and(|host| HOSTS.contains(&host))
}

pub fn extract(document: &Html) -> Option<String> {
    primary_column_text(document).or_else(|| join_posts(collect_posts(document)))
}

fn primary_column_text(document: &Html) -> Option<String> {
    select_first(document, PRIMARY_COLUMN)?;

    let mut column_copy = document.clone();
    let removed = remove_matching(&mut column_copy, Some(PRIMARY_COLUMN), COLUMN_NOISE);
    let column = select_first(&column_copy, PRIMARY_COLUMN)?;
    let text = rendered_text(column).trim().to_string();

    tracing::debug!(
        removed,
        chars = text.chars().count(),
        "thread primary column"
    );
    (text.chars().count() > MIN_COLUMN_CHARS).then_some(text)
}

/// One post in a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub author: String,
    pub text: String,
    pub timestamp: String,
    /// The post the viewer is focused on.
    pub primary: bool,
}

impl Post {
    fn dedup_key(&self) -> String {
        format!("{}|{}", self.author, char_prefix(&self.text, DEDUP_PREFIX_CHARS))
    }

    fn render(&self) -> String {
        let mut entry = String::new();
        if !self.author.is_empty() {
            entry.push_str(&self.author);
            entry.push('\n');
        }
        if !self.timestamp.is_empty() {
            entry.push_str(&self.timestamp);
            entry.push('\n');
        }
        entry.push_str(&self.text);

        if self.primary {
            entry
                .split('\n')
                .map(|line| format!("{QUOTE_MARKER}{line}"))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            entry
        }
    }
}

fn child_text(post: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = parse_selector(css)?;
    post.select(&selector).next().map(rendered_text)
}

fn post_timestamp(post: ElementRef<'_>) -> String {
    let Some(selector) = parse_selector("time") else {
        return String::new();
    };
    post.select(&selector)
        .next()
        .map(|time| match time.value().attr("datetime") {
            Some(datetime) if !datetime.is_empty() => datetime.to_string(),
            _ => rendered_text(time),
        })
        .unwrap_or_default()
}

/// Every post element in document order.
pub fn collect_posts(document: &Html) -> Vec<Post> {
    let Some(selector) = parse_selector(POST) else {
        return Vec::new();
    };
    let primary_id = select_first(document, PRIMARY_POST).map(|el| el.id());

    document
        .select(&selector)
        .map(|post| Post {
            author: child_text(post, POST_AUTHOR)
                .map(|name| name.replace('\n', " ").trim().to_string())
                .unwrap_or_default(),
            text: child_text(post, POST_TEXT)
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
            timestamp: post_timestamp(post),
            primary: Some(post.id()) == primary_id,
        })
        .collect()
}

/// Drop empty and duplicate posts, quote the primary one, and join the rest.
pub fn join_posts(posts: Vec<Post>) -> Option<String> {
    let mut seen = HashSet::new();
    let entries: Vec<String> = posts
        .into_iter()
        .filter(|post| !post.text.is_empty())
        .filter(|post| seen.insert(post.dedup_key()))
        .map(|post| post.render())
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries.join(POST_SEPARATOR))
    }
}
