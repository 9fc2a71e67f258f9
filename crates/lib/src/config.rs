//! Configuration types and loading.
//!
//! The receiver is configured from the process environment once, at entry, and the
//! resolved value is passed explicitly to [`crate::receiver::start`].

/// Default port when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 3005;

/// Default bind address when `HOST` is unset or empty (all interfaces).
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Largest accepted request body (100 KiB).
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable holding the bind address.
pub const HOST_ENV: &str = "HOST";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },
}

/// Receiver bind, port, and body limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverConfig {
    /// TCP port to listen on (default 3005). Port 0 asks the OS for a free port.
    pub port: u16,

    /// Bind address (default "0.0.0.0").
    pub bind: String,

    /// Maximum request body size in bytes; larger bodies get 413.
    pub body_limit: usize,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ReceiverConfig {
    /// Resolve from the process environment (`PORT`, `HOST`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(port) = non_empty(lookup(PORT_ENV)) {
            config.port = parse_port(&port)?;
        }
        if let Some(bind) = non_empty(lookup(HOST_ENV)) {
            config.bind = bind;
        }
        Ok(config)
    }

    /// Socket address string, e.g. "0.0.0.0:3005".
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind.trim(), self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|e| ConfigError::InvalidPort {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
