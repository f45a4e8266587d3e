use std::time::Duration;

use serde::Deserialize;

use crate::PollPolicy;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JudgeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `x-rapidapi-key` when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Sent as `x-rapidapi-host` when set.
    #[serde(default)]
    pub api_host: Option<String>,
    /// Upper bound for a single HTTP round-trip.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_poll_interval_ms")]
    pub max_poll_interval_ms: u64,
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

impl JudgeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            initial_interval: Duration::from_millis(self.poll_interval_ms),
            max_interval: Duration::from_millis(self.max_poll_interval_ms),
            factor: self.backoff_factor,
            max_attempts: self.max_poll_attempts,
        }
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_host: None,
            request_timeout_ms: default_request_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_interval_ms: default_max_poll_interval_ms(),
            backoff_factor: default_backoff_factor(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

fn default_base_url() -> String {
    "https://judge0-ce.p.rapidapi.com".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_max_poll_interval_ms() -> u64 {
    5_000
}

fn default_backoff_factor() -> f64 {
    1.5
}

fn default_max_poll_attempts() -> u32 {
    30
}
