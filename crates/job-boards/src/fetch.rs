// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP fetch utility
//!
//! [`HttpFetcher`] is the reqwest-backed [`Fetch`] implementation: one GET per call,
//! a fixed browser user agent, JSON bodies only, no retries.

use std::time::Duration;

use board_client::{ApiError, Fetch, Query, TransportError};
use reqwest::{Client, header::ACCEPT};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, error, warn};
use url::Url;

use crate::{JobBoardsConfig, NonEmptyString};

/// Browser-like user agent; some job boards refuse requests without one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:47.0) Gecko/20100101 Firefox/47.0";

/// reqwest-backed fetcher shared by all provider clients
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_seconds: u64,
}

impl HttpFetcher {
    /// Create a fetcher with the given user agent and per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the timeout is zero or the HTTP client
    /// cannot be created
    pub fn new(user_agent: &NonEmptyString, timeout_seconds: u64) -> Result<Self, ApiError> {
        if timeout_seconds == 0 {
            return Err(ApiError::Configuration {
                message: "timeout must be greater than 0".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            timeout_seconds,
        })
    }

    /// Create a fetcher from the transport part of a [`JobBoardsConfig`]
    ///
    /// # Errors
    ///
    /// See [`HttpFetcher::new`]
    pub fn from_config(config: &JobBoardsConfig) -> Result<Self, ApiError> {
        Self::new(&config.user_agent, config.timeout_seconds)
    }

    async fn get(&self, url: &Url, query: &Query) -> Result<Value, TransportError> {
        let pairs: Vec<(&str, &str)> = query.iter().collect();
        let response = self
            .client
            .get(url.clone())
            .query(&pairs)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Http {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(%url, status = status.as_u16(), "job board returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| TransportError::Http {
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| TransportError::InvalidResponse {
            message: e.to_string(),
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url, query: &Query) -> Result<Value, TransportError> {
        debug!(%url, parameters = query.len(), "fetching job board resource");

        timeout(
            Duration::from_secs(self.timeout_seconds),
            self.get(url, query),
        )
        .await
        .map_err(|_| TransportError::Timeout {
            timeout_seconds: self.timeout_seconds,
        })?
        .inspect_err(|e| error!(%url, "job board request failed: {e}"))
    }
}
