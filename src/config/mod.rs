//! Configuration management
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `HELPDESK__SECTION__KEY` environment variables.

use crate::domain::shared::result::Result;
use crate::domain::staff::WorkdayPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workday: WorkdayConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkdayConfig {
    /// Working time credited for every started session, in seconds
    pub minimum_session_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            minimum_session_secs: WorkdayPolicy::DEFAULT_MINIMUM_SESSION.as_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub const ENV_PREFIX: &'static str = "HELPDESK";

    /// Load configuration, layering the file (if any) and environment over defaults
    pub fn load(path: Option<&str>) -> std::result::Result<Self, ::config::ConfigError> {
        Self::load_with_prefix(path, Self::ENV_PREFIX)
    }

    /// Same as [`Config::load`] with overrides read from `{prefix}__SECTION__KEY`
    pub fn load_with_prefix(
        path: Option<&str>,
        env_prefix: &str,
    ) -> std::result::Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }
        builder
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn workday_policy(&self) -> Result<WorkdayPolicy> {
        WorkdayPolicy::new(Duration::from_secs(self.workday.minimum_session_secs))
    }
}
