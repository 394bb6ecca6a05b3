pub mod relay;
pub mod settings;
#[cfg(test)]
mod test_env;

pub use relay::{RelayConfig, WakeMode};
pub use settings::{DEFAULT_DISPLAY_NAME, Settings};
