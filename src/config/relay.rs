use std::fmt;

pub const DEFAULT_PORT: u16 = 3847;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_ACTION_PROGRAM: &str = "clawdbot";

/// How urgently the assistant should pick up a relayed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WakeMode {
    #[default]
    Now,
    NextHeartbeat,
}

impl WakeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::NextHeartbeat => "next-heartbeat",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "now" => Some(Self::Now),
            "next-heartbeat" => Some(Self::NextHeartbeat),
            _ => None,
        }
    }
}

impl fmt::Display for WakeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relay process settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Shared bearer secret. Empty disables authentication.
    pub webhook_token: String,
    pub wake_mode: WakeMode,
    /// Program invoked for every accepted page.
    pub action_program: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            webhook_token: String::new(),
            wake_mode: WakeMode::default(),
            action_program: DEFAULT_ACTION_PROGRAM.into(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(port_str) = std::env::var("PORT") {
            match port_str.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(value = %port_str, "ignoring invalid PORT"),
            }
        }

        if let Ok(host) = std::env::var("HOST")
            && !host.trim().is_empty()
        {
            self.host = host.trim().to_string();
        }

        if let Ok(token) = std::env::var("WEBHOOK_TOKEN") {
            self.webhook_token = token;
        }

        if let Ok(mode) = std::env::var("CLAWDBOT_WAKE_MODE") {
            self.wake_mode = WakeMode::parse(mode.trim()).unwrap_or_else(|| {
                tracing::warn!(
                    value = %mode,
                    fallback = WakeMode::default().as_str(),
                    "invalid CLAWDBOT_WAKE_MODE"
                );
                WakeMode::default()
            });
        }

        if let Ok(program) = std::env::var("CLAWDBOT_BIN")
            && !program.trim().is_empty()
        {
            self.action_program = program.trim().to_string();
        }
    }

    pub fn requires_auth(&self) -> bool {
        !self.webhook_token.is_empty()
    }
}
