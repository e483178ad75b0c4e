// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider abstraction and request validation for job board clients
//!
//! This crate holds everything that is common to job board providers, independent of
//! any particular HTTP stack.
//!
//! # Core Abstractions
//!
//! - **`Provider` Trait**: declarative endpoint table, cross-field rules, auth key and
//!   response envelope of one job board
//! - **`Fetch` Trait**: the single outbound capability, `fetch(url, query) -> JSON`
//! - **Validation Engine**: [`validation::validate`] checks a [`Query`] against an
//!   endpoint's [`ParameterSchema`] before any network I/O
//! - **Error Handling**: [`ApiError`] separates caller mistakes from [`TransportError`]s
//!
//! # Key Features
//!
//! - **Validation Before I/O**: every rule is evaluated synchronously, a failing query
//!   never reaches the fetcher
//! - **Envelope Normalization**: [`Provider::listings`] turns bare arrays and wrapped
//!   `results` objects into the same lazy [`Listings`] iterator
//! - **Order Preservation**: [`Query`] keeps the caller's parameter order all the way
//!   into the transport

use serde_json::Value;
use shared_types::ProviderId;
use thiserror::Error;
use url::Url;

pub mod query;
pub mod types;
pub mod validation;

pub use query::Query;
pub use types::*;

/// The outbound HTTP capability a job board client depends on
///
/// Implementations issue exactly one request per call and never retry. The response
/// body must be parsed as JSON; anything else is a [`TransportError`].
pub trait Fetch: Send + Sync {
    /// Fetch `url` with the given query parameters and return the parsed body
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails, times out, comes back with a
    /// non-success status, or the body is not valid JSON
    fn fetch(
        &self,
        url: &Url,
        query: &Query,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// A job board provider described by static tables
///
/// Implementors only declare data (base URL, endpoints, rules, envelope shape); the
/// provided methods implement endpoint resolution, validation and query building
/// uniformly for every provider.
pub trait Provider: Send + Sync {
    /// Identifier of this provider
    fn id(&self) -> ProviderId;

    /// Base URL every endpoint path is resolved against
    fn base_url(&self) -> &Url;

    /// Static endpoint table
    fn endpoints(&self) -> &'static [Endpoint];

    /// Provider-wide relational rules, evaluated in order before field checks
    fn cross_field_rules(&self) -> &'static [CrossFieldRule] {
        &[]
    }

    /// Query key under which the authentication token is sent, if the provider has one
    fn auth_param(&self) -> Option<&'static str> {
        None
    }

    /// Snapshot of the current authentication token
    fn auth_token(&self) -> Option<String> {
        None
    }

    /// Message used when a required parameter is absent
    fn missing_parameter_message(&self, parameter: &str) -> String {
        format!("The {parameter} parameter must be supplied.")
    }

    /// Lazily iterate the listing records held in a response of this provider
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedEnvelope`] if the response is not shaped the way
    /// this provider answers
    fn listings<'r>(&self, response: &'r RawResponse) -> Result<Listings<'r>, ApiError>;

    /// Look up an endpoint by name
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownEndpoint`] if the provider defines no such endpoint
    fn resolve_endpoint(&self, name: &str) -> Result<&'static Endpoint, ApiError> {
        self.endpoints()
            .iter()
            .find(|endpoint| endpoint.name == name)
            .ok_or_else(|| ApiError::UnknownEndpoint {
                provider: self.id(),
                endpoint: name.to_string(),
            })
    }

    /// Validate a query against a search endpoint
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, see [`validation::validate`]
    fn validate(&self, endpoint: &Endpoint, query: &Query) -> Result<(), ApiError> {
        validation::validate(self, endpoint, query)
    }

    /// Add the authentication token to an already validated query
    ///
    /// A token that is set always overwrites a caller-supplied value under the same key.
    fn build_query(&self, mut query: Query) -> Query {
        if let (Some(key), Some(token)) = (self.auth_param(), self.auth_token()) {
            query.insert(key, token);
        }
        query
    }

    /// Target URL of a search endpoint
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnresolvableEndpoint`] for lookup endpoints and
    /// [`ApiError::Configuration`] if the base URL cannot carry a path
    fn search_url(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        if endpoint.schema().is_none() {
            return Err(ApiError::UnresolvableEndpoint {
                provider: self.id(),
                endpoint: endpoint.name.to_string(),
                operation: "search",
            });
        }
        join_path(self.base_url(), endpoint.path, None)
    }

    /// Target URL of a single entity behind a lookup endpoint
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnresolvableEndpoint`] for search endpoints
    /// - [`ApiError::InvalidArgument`] if the id would form a `.` or `..` path segment
    /// - [`ApiError::Configuration`] if the base URL cannot carry a path
    fn lookup_url(&self, endpoint: &Endpoint, id: &str) -> Result<Url, ApiError> {
        let EndpointKind::Lookup { suffix } = endpoint.kind else {
            return Err(ApiError::UnresolvableEndpoint {
                provider: self.id(),
                endpoint: endpoint.name.to_string(),
                operation: "find_by_id",
            });
        };
        let segment = format!("{id}{suffix}");
        if is_dot_segment(&segment) {
            return Err(ApiError::InvalidArgument {
                message: format!("id {id:?} does not name an entity"),
            });
        }
        join_path(self.base_url(), endpoint.path, Some(&segment))
    }
}

/// Providers whose requests can carry an authentication token
///
/// The token is state of the provider instance. It is read when each request builds
/// its query, so in-flight requests keep the value they started with.
pub trait Authenticated: Provider {
    /// Set or replace the token sent with every subsequent request
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if the token is empty
    fn set_auth_token(&self, token: &str) -> Result<(), ApiError>;

    /// Stop sending a token
    fn clear_auth_token(&self);
}

/// `.` and `..` (also percent-encoded) are dropped or resolved by URL path handling
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn join_path(base: &Url, path: &str, last: Option<&str>) -> Result<Url, ApiError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ApiError::Configuration {
                message: format!("base URL {base} cannot carry a path"),
            })?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        if let Some(last) = last {
            segments.push(last);
        }
    }
    Ok(url)
}

/// Errors raised by a job board client
///
/// Every variant except [`ApiError::Transport`] is raised before any network call and
/// signals a mistake in the caller's request.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// A parameter outside the endpoint's accepted set was supplied
    #[error("The parameter {field} for endpoint {endpoint} is not supported by {provider}'s API")]
    UnsupportedField {
        provider: ProviderId,
        endpoint: String,
        field: String,
    },

    /// A required parameter was omitted
    #[error("{message} ({provider} endpoint {endpoint} requires {parameter})")]
    MissingRequiredParameter {
        provider: ProviderId,
        endpoint: String,
        parameter: String,
        message: String,
    },

    /// A provider-specific relationship between parameters was violated
    #[error("{provider} rejected the query: {message}")]
    CrossFieldValidation { provider: ProviderId, message: String },

    /// The provider defines no endpoint with this name
    #[error("{provider} has no endpoint named {endpoint}")]
    UnknownEndpoint {
        provider: ProviderId,
        endpoint: String,
    },

    /// The endpoint exists but cannot serve the requested operation
    #[error("{provider} endpoint {endpoint} cannot be used for {operation}")]
    UnresolvableEndpoint {
        provider: ProviderId,
        endpoint: String,
        operation: &'static str,
    },

    /// A response did not have the provider's envelope shape
    #[error("{provider} response is not {expected}")]
    UnexpectedEnvelope {
        provider: ProviderId,
        expected: &'static str,
    },

    /// An argument was rejected before building a request
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The fetch failed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Whether this error reports a malformed request rather than an environmental failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedField { .. }
                | Self::MissingRequiredParameter { .. }
                | Self::CrossFieldValidation { .. }
                | Self::UnknownEndpoint { .. }
                | Self::UnresolvableEndpoint { .. }
                | Self::InvalidArgument { .. }
        )
    }
}

/// Network or response-parsing failures reported by a [`Fetch`] implementation
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// The server answered with a non-success status
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The body was not valid JSON
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// Fetcher specific error
    #[error(transparent)]
    Custom { error: anyhow::Error },
}
