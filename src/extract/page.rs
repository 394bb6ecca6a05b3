//! The page capability.
//!
//! Everything that touches a live page goes through [`Tab`]. A tab can hand
//! out a serializable [`PageSnapshot`], report the user's selection, and
//! fetch text from its own origin with whatever session the page carries.
//! Extraction itself runs over the snapshot only and never calls back into
//! the tab.

use crate::error::ExtractionError;
use reqwest::header::{COOKIE, HeaderValue};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use url::Url;

/// Serializable copy of a page at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
    /// Text the user had highlighted, or empty.
    #[serde(default)]
    pub selection: String,
}

pub type TabFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A page the user is looking at.
pub trait Tab: Send + Sync {
    /// Address of the page as the browser reports it.
    fn url(&self) -> &str;

    /// Title the browser shows for the tab, possibly empty.
    fn title(&self) -> &str;

    /// Capture the page's current DOM and selection.
    fn snapshot(&self) -> TabFuture<'_, Result<PageSnapshot, ExtractionError>>;

    /// Current selection text, or empty when nothing is selected.
    fn selection(&self) -> TabFuture<'_, String>;

    /// GET `path` relative to the page's own origin, carrying the page's
    /// session, and return the body text.
    fn fetch_same_origin<'a>(
        &'a self,
        path: &'a str,
    ) -> TabFuture<'a, Result<String, ExtractionError>>;
}

fn build_page_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("openclaw-send/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

fn resolve_same_origin(base: &Url, path: &str) -> Result<Url, ExtractionError> {
    let target = base
        .join(path)
        .map_err(|e| ExtractionError::ExportFetch(format!("invalid path {path}: {e}")))?;
    if target.origin() != base.origin() {
        return Err(ExtractionError::ExportFetch(format!(
            "refusing cross-origin fetch to {target}"
        )));
    }
    Ok(target)
}

async fn fetch_text(
    client: &reqwest::Client,
    target: Url,
    cookie: Option<&HeaderValue>,
) -> Result<String, ExtractionError> {
    let mut request = client.get(target.clone());
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie.clone());
    }

    let response = request
        .send()
        .await
        .map_err(|e| ExtractionError::ExportFetch(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %target, status = status.as_u16(), "same-origin fetch failed");
        return Err(ExtractionError::ExportHttp {
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| ExtractionError::ExportFetch(e.to_string()))
}

/// A live page reached over HTTP, optionally with the user's session cookie.
pub struct HttpTab {
    url: Url,
    title: String,
    selection: String,
    cookie: Option<HeaderValue>,
    client: reqwest::Client,
}

impl HttpTab {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: String::new(),
            selection: String::new(),
            cookie: None,
            client: build_page_client(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = selection.into();
        self
    }

    /// Attach a `Cookie` header value sent with every request from this tab.
    pub fn with_cookie(mut self, cookie: &str) -> Result<Self, ExtractionError> {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| ExtractionError::Snapshot(format!("invalid cookie header: {e}")))?;
        self.cookie = Some(value);
        Ok(self)
    }
}

impl Tab for HttpTab {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn snapshot(&self) -> TabFuture<'_, Result<PageSnapshot, ExtractionError>> {
        Box::pin(async move {
            let html = fetch_text(&self.client, self.url.clone(), self.cookie.as_ref())
                .await
                .map_err(|e| ExtractionError::Snapshot(e.to_string()))?;
            Ok(PageSnapshot {
                url: self.url.to_string(),
                html,
                selection: self.selection.clone(),
            })
        })
    }

    fn selection(&self) -> TabFuture<'_, String> {
        Box::pin(async move { self.selection.clone() })
    }

    fn fetch_same_origin<'a>(
        &'a self,
        path: &'a str,
    ) -> TabFuture<'a, Result<String, ExtractionError>> {
        Box::pin(async move {
            let target = resolve_same_origin(&self.url, path)?;
            fetch_text(&self.client, target, self.cookie.as_ref()).await
        })
    }
}

/// A page saved to disk, attributed to the address it was saved from.
pub struct FileTab {
    path: PathBuf,
    url: Url,
    title: String,
    selection: String,
    client: reqwest::Client,
}

impl FileTab {
    pub fn new(path: impl Into<PathBuf>, url: Url) -> Self {
        Self {
            path: path.into(),
            url,
            title: String::new(),
            selection: String::new(),
            client: build_page_client(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = selection.into();
        self
    }
}

impl Tab for FileTab {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn snapshot(&self) -> TabFuture<'_, Result<PageSnapshot, ExtractionError>> {
        Box::pin(async move {
            let html = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                ExtractionError::Snapshot(format!("read {}: {e}", self.path.display()))
            })?;
            Ok(PageSnapshot {
                url: self.url.to_string(),
                html,
                selection: self.selection.clone(),
            })
        })
    }

    fn selection(&self) -> TabFuture<'_, String> {
        Box::pin(async move { self.selection.clone() })
    }

    fn fetch_same_origin<'a>(
        &'a self,
        path: &'a str,
    ) -> TabFuture<'a, Result<String, ExtractionError>> {
        Box::pin(async move {
            let target = resolve_same_origin(&self.url, path)?;
            fetch_text(&self.client, target, None).await
        })
    }
}
