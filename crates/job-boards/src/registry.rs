// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Job board client registry
//!
//! Holds one optional client per provider and dispatches calls by [`ProviderId`].

use board_client::{ApiError, Fetch, Listings, Query, RawResponse};
use shared_types::ProviderId;
use tracing::{debug, info};

use crate::{Github, HttpFetcher, JobBoardClient, JobBoardsConfig, TheMuse};

/// Registry of job board clients
#[derive(Debug)]
pub struct JobBoardRegistry<F = HttpFetcher> {
    github_client: Option<JobBoardClient<Github, F>>,
    the_muse_client: Option<JobBoardClient<TheMuse, F>>,
}

/// Error type for registry operations
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum RegistryError {
    /// No client registered for the provider
    #[error("No client registered for {provider}")]
    NotRegistered { provider: ProviderId },

    /// The provider has no authentication
    #[error("{provider} does not support authentication")]
    AuthNotSupported { provider: ProviderId },

    /// Error from the provider client
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl<F> Default for JobBoardRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl JobBoardRegistry<HttpFetcher> {
    /// Build clients for every enabled provider, sharing one HTTP connection pool
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the configuration is invalid or the
    /// HTTP client cannot be created
    pub fn from_config(config: &JobBoardsConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let fetcher = HttpFetcher::from_config(config)?;

        let github_client = if config.github.enabled {
            let provider = Github::with_base_url(config.base_url(ProviderId::Github)?);
            Some(JobBoardClient::with_fetcher(provider, fetcher.clone()))
        } else {
            debug!("Github disabled by configuration");
            None
        };

        let the_muse_client = if config.the_muse.enabled {
            let provider = TheMuse::with_base_url(config.base_url(ProviderId::TheMuse)?);
            Some(JobBoardClient::with_fetcher(provider, fetcher))
        } else {
            debug!("The Muse disabled by configuration");
            None
        };

        let registry = Self::with_clients(github_client, the_muse_client);
        info!(clients = registry.client_count(), "job board registry ready");
        Ok(registry)
    }
}

impl<F> JobBoardRegistry<F> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            github_client: None,
            the_muse_client: None,
        }
    }

    /// Create a registry with the specified clients
    pub fn with_clients(
        github_client: Option<JobBoardClient<Github, F>>,
        the_muse_client: Option<JobBoardClient<TheMuse, F>>,
    ) -> Self {
        Self {
            github_client,
            the_muse_client,
        }
    }

    /// The Github client, if registered
    pub fn github(&self) -> Option<&JobBoardClient<Github, F>> {
        self.github_client.as_ref()
    }

    /// The Muse client, if registered
    pub fn the_muse(&self) -> Option<&JobBoardClient<TheMuse, F>> {
        self.the_muse_client.as_ref()
    }

    /// Get the number of registered clients
    pub fn client_count(&self) -> usize {
        usize::from(self.github_client.is_some()) + usize::from(self.the_muse_client.is_some())
    }

    /// Get the providers of registered clients
    pub fn client_names(&self) -> Vec<ProviderId> {
        ProviderId::all()
            .iter()
            .copied()
            .filter(|&provider| self.is_registered(provider))
            .collect()
    }

    fn is_registered(&self, provider: ProviderId) -> bool {
        match provider {
            ProviderId::Github => self.github_client.is_some(),
            ProviderId::TheMuse => self.the_muse_client.is_some(),
        }
    }

    fn github_or_err(&self) -> Result<&JobBoardClient<Github, F>, RegistryError> {
        self.github().ok_or(RegistryError::NotRegistered {
            provider: ProviderId::Github,
        })
    }

    fn the_muse_or_err(&self) -> Result<&JobBoardClient<TheMuse, F>, RegistryError> {
        self.the_muse().ok_or(RegistryError::NotRegistered {
            provider: ProviderId::TheMuse,
        })
    }
}

impl<F: Fetch> JobBoardRegistry<F> {
    /// Search an endpoint of the given provider
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the provider has no client, or the
    /// client's [`ApiError`]
    pub async fn search(
        &self,
        provider: ProviderId,
        endpoint: &str,
        params: Query,
    ) -> Result<RawResponse, RegistryError> {
        debug!(%provider, endpoint, "dispatching search");
        let response = match provider {
            ProviderId::Github => self.github_or_err()?.search(endpoint, params).await?,
            ProviderId::TheMuse => self.the_muse_or_err()?.search(endpoint, params).await?,
        };
        Ok(response)
    }

    /// Fetch a single entity from the given provider
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the provider has no client, or the
    /// client's [`ApiError`]
    pub async fn find_by_id(
        &self,
        provider: ProviderId,
        endpoint: &str,
        id: &str,
    ) -> Result<RawResponse, RegistryError> {
        debug!(%provider, endpoint, id, "dispatching lookup");
        let response = match provider {
            ProviderId::Github => self.github_or_err()?.find_by_id(endpoint, id).await?,
            ProviderId::TheMuse => self.the_muse_or_err()?.find_by_id(endpoint, id).await?,
        };
        Ok(response)
    }

    /// Iterate the records of a response from the given provider
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the provider has no client, or
    /// [`ApiError::UnexpectedEnvelope`] if the response is not one of its searches
    pub fn iterate<'r>(
        &self,
        provider: ProviderId,
        response: &'r RawResponse,
    ) -> Result<Listings<'r>, RegistryError> {
        let listings = match provider {
            ProviderId::Github => self.github_or_err()?.iterate(response)?,
            ProviderId::TheMuse => self.the_muse_or_err()?.iterate(response)?,
        };
        Ok(listings)
    }

    /// Set the authentication token of the given provider
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AuthNotSupported`] if the provider has no authentication
    /// - [`RegistryError::NotRegistered`] if the provider has no client
    /// - [`ApiError::InvalidArgument`] if the token is blank
    pub fn set_auth_token(&self, provider: ProviderId, token: &str) -> Result<(), RegistryError> {
        if !provider.supports_auth() {
            return Err(RegistryError::AuthNotSupported { provider });
        }
        match provider {
            ProviderId::TheMuse => Ok(self.the_muse_or_err()?.set_auth_token(token)?),
            ProviderId::Github => Err(RegistryError::AuthNotSupported { provider }),
        }
    }
}
