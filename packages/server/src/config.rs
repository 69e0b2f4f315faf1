//! Server configuration.

use std::time::Duration;

use crate::domain::DEFAULT_MAX_PAIRINGS_PER_PASS;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Runtime settings for one worker instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Period of the inactivity sweep (each tick also retries pairing).
    pub cleanup_interval: Duration,
    /// Participants idle for longer than this are removed by the sweep.
    pub inactivity_timeout: Duration,
    pub max_pairings_per_pass: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
            max_pairings_per_pass: DEFAULT_MAX_PAIRINGS_PER_PASS,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn inactivity_timeout_millis(&self) -> i64 {
        i64::try_from(self.inactivity_timeout.as_millis()).unwrap_or(i64::MAX)
    }
}
