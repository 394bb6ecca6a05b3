use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `openclaw-send`.
///
/// Each stage of the send pipeline defines its own error variant. Library
/// callers can match on these to pick the status text shown to the user;
/// binary glue continues to use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum SendError {
    // ── Extraction ──────────────────────────────────────────────────────
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),

    // ── Delivery ────────────────────────────────────────────────────────
    #[error("delivery: {0}")]
    Delivery(#[from] DeliveryError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Extraction errors ───────────────────────────────────────────────────────

/// Failures while reading a page.
///
/// DOM-path extraction never produces one of these: it degrades to the raw
/// body text instead. Only the page capability itself (snapshot or
/// same-origin fetch) can fail.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("HTTP {status}")]
    ExportHttp { status: u16 },

    #[error("{0}")]
    ExportFetch(String),

    #[error("page snapshot failed: {0}")]
    Snapshot(String),

    #[error("no active tab found")]
    NoActiveTarget,
}

// ─── Delivery errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("transport: {0}")]
    Transport(String),

    #[error("page has neither content nor selection")]
    EmptyBody,
}

// ─── External action errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    StartFailed(String),

    #[error("{program} exited with {code}")]
    ExitCode { program: String, code: i32 },

    #[error("{program} terminated by signal")]
    Signaled { program: String },
}
