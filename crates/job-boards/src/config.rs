// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! Transport settings and provider endpoints, loaded with the `config` crate from
//! (later sources override earlier ones):
//!
//! 1. default values
//! 2. an optional `job-boards.json` file in the working directory
//! 3. environment variables with the `JOB_BOARDS__` prefix, nested keys separated by
//!    `__` (e.g. `JOB_BOARDS__THE_MUSE__BASE_URL`)
//!
//! Authentication tokens are not part of this configuration; they are handed to the
//! client at runtime.

use board_client::ApiError;
use config::{
    Config, ConfigError, Environment, File,
    builder::{ConfigBuilder, DefaultState},
};
use serde::{Deserialize, Serialize};
use shared_types::ProviderId;
use url::Url;

use crate::{NonEmptyString, fetch::DEFAULT_USER_AGENT};

const CONFIG_FILE_NAME: &str = "job-boards";
const ENV_PREFIX: &str = "JOB_BOARDS";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Settings for a single provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Whether the registry should build a client for this provider
    pub enabled: bool,
    /// Override of the provider's production base URL
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
        }
    }
}

/// Configuration for the job board clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobBoardsConfig {
    /// User agent sent with every request
    pub user_agent: NonEmptyString,
    /// Per-request timeout in seconds (1-300)
    pub timeout_seconds: u64,
    /// Github Jobs settings
    pub github: ProviderConfig,
    /// The Muse settings
    pub the_muse: ProviderConfig,
}

impl Default for JobBoardsConfig {
    #[allow(clippy::missing_panics_doc)]
    fn default() -> Self {
        Self {
            user_agent: NonEmptyString::new(DEFAULT_USER_AGENT).expect("known to be non-empty"),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            github: ProviderConfig::default(),
            the_muse: ProviderConfig::default(),
        }
    }
}

impl JobBoardsConfig {
    /// Load configuration from the optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if a source cannot be read or the result
    /// does not validate
    pub fn from_env() -> Result<Self, ApiError> {
        Self::load().map_err(|e| ApiError::Configuration {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(config)
    }

    /// Check value ranges and base URLs
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] describing the first invalid value
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ApiError::Configuration {
                message: format!(
                    "timeout_seconds must be between 1 and {MAX_TIMEOUT_SECONDS}, got {}",
                    self.timeout_seconds
                ),
            });
        }
        for &provider in ProviderId::all() {
            self.base_url(provider)?;
        }
        Ok(())
    }

    /// Settings of one provider
    pub fn provider(&self, provider: ProviderId) -> &ProviderConfig {
        match provider {
            ProviderId::Github => &self.github,
            ProviderId::TheMuse => &self.the_muse,
        }
    }

    /// Effective base URL of a provider: the override if set, the production URL otherwise
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the URL does not parse
    pub fn base_url(&self, provider: ProviderId) -> Result<Url, ApiError> {
        let raw = self
            .provider(provider)
            .base_url
            .as_deref()
            .unwrap_or(provider.default_base_url());
        Url::parse(raw).map_err(|e| ApiError::Configuration {
            message: format!("invalid base URL for {provider}: {raw}: {e}"),
        })
    }
}
