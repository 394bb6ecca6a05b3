use crate::error::{ExtractionError, SendError};
use crate::extract::{DocumentStrategy, ExtractOptions, FileTab, HttpTab, Tab};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// `openclaw-send` - capture the page you are reading and wake your assistant with it.
#[derive(Parser, Debug)]
#[command(name = "openclaw-send")]
#[command(version)]
#[command(about = "Send web pages to an OpenClaw assistant.", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the relay that turns posted pages into wake events
    Relay {
        /// Port to listen on (default: $PORT or 3847, use 0 for a random port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default: $HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,
    },

    /// Extract a page and print the result as JSON
    Extract {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Extract a page and post it to the configured relay
    Send {
        #[command(flatten)]
        target: TargetArgs,

        /// Note sent along with the page
        #[arg(short, long, default_value = "")]
        message: String,

        /// Settings file (default: ~/.openclaw-send/settings.toml)
        #[arg(long, env = "OPENCLAW_SEND_SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Show or edit client settings
    Settings {
        /// Settings file (default: ~/.openclaw-send/settings.toml)
        #[arg(long, env = "OPENCLAW_SEND_SETTINGS")]
        settings: Option<PathBuf>,

        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommands {
    /// Print effective settings with the token masked
    Show,
    /// Update settings; omitted fields keep their value
    Set {
        #[arg(long)]
        webhook_url: Option<String>,
        #[arg(long)]
        auth_token: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
    },
}

/// Which page to read.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Fetch the page live from this address
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Cookie header sent with live fetches, for pages behind a login
    #[arg(long, requires = "url")]
    pub cookie: Option<String>,

    /// Read a saved page from disk
    #[arg(long, requires = "page_url")]
    pub file: Option<PathBuf>,

    /// Address the saved page was captured from
    #[arg(long, requires = "file")]
    pub page_url: Option<String>,

    /// Tab title as the browser shows it, used when the page has no `<title>`
    #[arg(long)]
    pub title: Option<String>,

    /// Text selected on the page
    #[arg(long)]
    pub selection: Option<String>,

    /// How document-editor pages are read
    #[arg(long, value_enum, default_value_t)]
    pub doc_strategy: DocumentStrategy,
}

impl TargetArgs {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            document_strategy: self.doc_strategy,
        }
    }

    /// Open the tab these flags describe, or `None` when no page was named.
    pub fn open_tab(&self) -> Result<Option<Box<dyn Tab>>, SendError> {
        if let Some(url) = &self.url {
            let mut tab = HttpTab::new(parse_page_url(url)?);
            if let Some(cookie) = &self.cookie {
                tab = tab.with_cookie(cookie)?;
            }
            if let Some(title) = &self.title {
                tab = tab.with_title(title.as_str());
            }
            if let Some(selection) = &self.selection {
                tab = tab.with_selection(selection.as_str());
            }
            return Ok(Some(Box::new(tab)));
        }

        if let (Some(file), Some(page_url)) = (&self.file, &self.page_url) {
            let mut tab = FileTab::new(file.clone(), parse_page_url(page_url)?);
            if let Some(title) = &self.title {
                tab = tab.with_title(title.as_str());
            }
            if let Some(selection) = &self.selection {
                tab = tab.with_selection(selection.as_str());
            }
            return Ok(Some(Box::new(tab)));
        }

        Ok(None)
    }

    /// Like [`Self::open_tab`], but a missing page is an error.
    pub fn require_tab(&self) -> Result<Box<dyn Tab>, SendError> {
        self.open_tab()?
            .ok_or(SendError::Extraction(ExtractionError::NoActiveTarget))
    }
}

fn parse_page_url(raw: &str) -> Result<Url, SendError> {
    Url::parse(raw.trim())
        .map_err(|e| SendError::Other(anyhow::anyhow!("invalid page URL {raw}: {e}")))
}
