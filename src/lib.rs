#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod extract;
pub mod transport;
pub mod utils;

pub use config::{RelayConfig, Settings, WakeMode};
pub use error::{ActionError, ConfigError, DeliveryError, ExtractionError, SendError};
pub use extract::{ExtractOptions, ExtractionResult, Tab};
