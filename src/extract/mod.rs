//! Turning a browser tab into `(url, title, selection, content)`.

pub mod adapters;
pub mod noise;
pub mod orchestrator;
pub mod page;
pub mod scorer;
pub mod text;

pub use adapters::{DocumentStrategy, SiteAdapter};
pub use orchestrator::{ContentSource, ExtractOptions, ExtractionResult, extract, extract_page};
pub use page::{FileTab, HttpTab, PageSnapshot, Tab, TabFuture};
