// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Job board provider identifiers

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported job board providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    /// Github Jobs: bare-array responses, lat/long cross-field rules
    Github,
    /// The Muse: wrapped `results` responses, mandatory `page`, optional API key
    TheMuse,
}

impl ProviderId {
    /// Returns the human-readable name of the provider
    pub const fn name(self) -> &'static str {
        match self {
            Self::Github => "Github",
            Self::TheMuse => "TheMuse",
        }
    }

    /// Returns the lowercase identifier used in configuration keys and logs
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::TheMuse => "the_muse",
        }
    }

    /// Returns the production base URL of the provider's public API
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Github => "https://jobs.github.com",
            Self::TheMuse => "https://themuse.com/api/public",
        }
    }

    /// Returns whether the provider accepts an authentication token
    pub const fn supports_auth(self) -> bool {
        matches!(self, Self::TheMuse)
    }

    /// Returns all supported providers
    pub const fn all() -> &'static [Self] {
        &[Self::Github, Self::TheMuse]
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProviderId {
    type Err = ProviderIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "github" | "github_jobs" => Ok(Self::Github),
            "themuse" | "the_muse" | "muse" => Ok(Self::TheMuse),
            _ => Err(ProviderIdParseError(s.to_string())),
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a provider name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported job board provider: {0}. Supported providers are: Github, TheMuse")]
pub struct ProviderIdParseError(pub String);
