use std::env;
use std::path::Path;

use algoarena_core::ValidationMode;
use anyhow::Context;
use judge_client::JudgeConfig;
use serde::Deserialize;
use tracing::info;

type Result<T> = anyhow::Result<T>;

const CONFIG_PATH_ENV: &str = "ALGOARENA_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "algoarena.toml";
const JUDGE_API_KEY_ENV: &str = "JUDGE_API_KEY";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Dispatch every reference solution's batch at once instead of one
    /// language after another.
    #[serde(default)]
    pub concurrent_languages: bool,
}

impl ValidationConfig {
    pub fn mode(&self) -> ValidationMode {
        if self.concurrent_languages {
            ValidationMode::Concurrent
        } else {
            ValidationMode::Sequential
        }
    }
}

impl ServerConfig {
    /// Reads the file named by `ALGOARENA_CONFIG` (or `algoarena.toml`),
    /// falling back to defaults when it does not exist, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&path).exists() {
            info!(path = %path, "loading server config");
            Self::from_file(&path)?
        } else {
            info!(path = %path, "config file not found, using defaults");
            Self::default()
        };

        if let Ok(api_key) = env::var(JUDGE_API_KEY_ENV) {
            config.apply_judge_api_key(api_key);
        }

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read server config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse server config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }

    fn apply_judge_api_key(&mut self, api_key: String) {
        let api_key = api_key.trim();
        if !api_key.is_empty() {
            self.judge.api_key = Some(api_key.to_string());
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            judge: JudgeConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}
