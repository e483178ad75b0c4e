// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider client
//!
//! [`JobBoardClient`] pairs a [`Provider`] with a [`Fetch`] implementation. Queries are
//! validated before they are fetched.

use board_client::{ApiError, Authenticated, Fetch, Listings, Provider, Query, RawResponse};
use tracing::{debug, info};

use crate::{HttpFetcher, JobBoardsConfig};

/// Validated search and lookup against one job board
#[derive(Debug)]
pub struct JobBoardClient<P, F = HttpFetcher> {
    provider: P,
    fetcher: F,
}

impl<P: Provider> JobBoardClient<P, HttpFetcher> {
    /// Create a client with an HTTP fetcher built from the default configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be created
    pub fn new(provider: P) -> Result<Self, ApiError> {
        let fetcher = HttpFetcher::from_config(&JobBoardsConfig::default())?;
        Ok(Self::with_fetcher(provider, fetcher))
    }
}

impl<P: Provider, F: Fetch> JobBoardClient<P, F> {
    /// Create a client over an existing fetcher
    pub fn with_fetcher(provider: P, fetcher: F) -> Self {
        Self { provider, fetcher }
    }

    /// The provider this client talks to
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Name of the provider
    pub fn name(&self) -> &'static str {
        self.provider.id().name()
    }

    /// Search an endpoint with named parameters
    ///
    /// The query is fully validated before anything is sent; an invalid query never
    /// reaches the fetcher. If the provider holds an authentication token it is added
    /// to the outgoing query, replacing any value the caller put under the same key.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnknownEndpoint`] / [`ApiError::UnresolvableEndpoint`] if the
    ///   endpoint does not exist or is a lookup endpoint
    /// - [`ApiError::CrossFieldValidation`], [`ApiError::UnsupportedField`] or
    ///   [`ApiError::MissingRequiredParameter`] if validation fails
    /// - [`ApiError::Transport`] if the request itself fails
    pub async fn search(&self, endpoint: &str, params: Query) -> Result<RawResponse, ApiError> {
        let provider = self.provider.id();
        let endpoint = self.provider.resolve_endpoint(endpoint)?;
        self.provider.validate(endpoint, &params)?;

        let url = self.provider.search_url(endpoint)?;
        let query = self.provider.build_query(params);

        debug!(%provider, endpoint = endpoint.name, %url, "searching job board");
        let value = self.fetcher.fetch(&url, &query).await?;
        info!(%provider, endpoint = endpoint.name, "search completed");

        Ok(RawResponse::new(value))
    }

    /// Fetch a single entity from a lookup endpoint
    ///
    /// No parameter validation applies; the only query parameter sent is the
    /// authentication token, if one is set.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] if `id` is blank or a `.`/`..` path segment
    /// - [`ApiError::UnknownEndpoint`] / [`ApiError::UnresolvableEndpoint`] if the
    ///   endpoint does not exist or has no lookup target
    /// - [`ApiError::Transport`] if the request itself fails
    pub async fn find_by_id(&self, endpoint: &str, id: &str) -> Result<RawResponse, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidArgument {
                message: "id cannot be empty".to_string(),
            });
        }

        let provider = self.provider.id();
        let endpoint = self.provider.resolve_endpoint(endpoint)?;
        let url = self.provider.lookup_url(endpoint, id)?;
        let query = self.provider.build_query(Query::new());

        debug!(%provider, endpoint = endpoint.name, %url, "looking up job board entity");
        let value = self.fetcher.fetch(&url, &query).await?;
        info!(%provider, endpoint = endpoint.name, id, "lookup completed");

        Ok(RawResponse::new(value))
    }

    /// Iterate the listing records of a response previously returned by this client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedEnvelope`] if the response is not shaped the way
    /// the provider answers searches
    pub fn iterate<'r>(&self, response: &'r RawResponse) -> Result<Listings<'r>, ApiError> {
        self.provider.listings(response)
    }
}

impl<P: Authenticated, F: Fetch> JobBoardClient<P, F> {
    /// Set the token sent with every subsequent request
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if the token is blank
    pub fn set_auth_token(&self, token: &str) -> Result<(), ApiError> {
        self.provider.set_auth_token(token)
    }

    /// Stop sending a token
    pub fn clear_auth_token(&self) {
        self.provider.clear_auth_token();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use board_client::TransportError;
    use serde_json::{Value, json};
    use shared_types::ProviderId;
    use url::Url;

    use super::*;
    use crate::{Github, TheMuse};

    /// Records every request and answers with a canned body
    #[derive(Debug)]
    struct RecordingFetcher {
        response: Value,
        requests: Mutex<Vec<(Url, Query)>>,
    }

    impl RecordingFetcher {
        fn answering(response: Value) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(Url, Query)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Fetch for RecordingFetcher {
        async fn fetch(&self, url: &Url, query: &Query) -> Result<Value, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.clone(), query.clone()));
            Ok(self.response.clone())
        }
    }

    /// Fails the test if any request is issued
    #[derive(Debug)]
    struct UnreachableFetcher;

    impl Fetch for UnreachableFetcher {
        async fn fetch(&self, url: &Url, _query: &Query) -> Result<Value, TransportError> {
            panic!("fetch must not be called, got request for {url}");
        }
    }

    #[derive(Debug)]
    struct FailingFetcher;

    impl Fetch for FailingFetcher {
        async fn fetch(&self, _url: &Url, _query: &Query) -> Result<Value, TransportError> {
            Err(TransportError::Timeout { timeout_seconds: 1 })
        }
    }

    #[tokio::test]
    async fn github_search_issues_one_fetch() {
        let body = json!([{"id": "1", "title": "Software Engineer"}]);
        let client =
            JobBoardClient::with_fetcher(Github::default(), RecordingFetcher::answering(body.clone()));

        let query = Query::new()
            .with("description", "Software Engineer")
            .with("location", "New York City")
            .with("full_time", "true");
        let response = client.search("jobs", query.clone()).await.unwrap();

        assert_eq!(response.as_value(), &body);
        let requests = client.fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.as_str(), "https://jobs.github.com/positions.json");
        assert_eq!(requests[0].1, query);
    }

    #[tokio::test]
    async fn validation_failures_never_fetch() {
        let github = JobBoardClient::with_fetcher(Github::default(), UnreachableFetcher);
        let muse = JobBoardClient::with_fetcher(TheMuse::default(), UnreachableFetcher);

        let error = github
            .search("jobs", Query::from([("lat", "40.7128")]))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::CrossFieldValidation { .. }));

        let error = github
            .search("jobs", Query::from([("salary", "1000000")]))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::UnsupportedField { .. }));

        let error = muse
            .search(
                "jobs",
                Query::from([("company", "Google"), ("location", "New York City")]),
            )
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::MissingRequiredParameter { .. }));

        let error = muse.search("events", Query::new()).await.unwrap_err();
        assert!(matches!(error, ApiError::UnknownEndpoint { .. }));

        let error = muse.find_by_id("jobs", "42").await.unwrap_err();
        assert!(matches!(error, ApiError::UnresolvableEndpoint { .. }));

        let error = muse.find_by_id("job_id", " ").await.unwrap_err();
        assert!(matches!(error, ApiError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn token_added_to_search_without_caller_supplying_it() {
        let client = JobBoardClient::with_fetcher(
            TheMuse::default(),
            RecordingFetcher::answering(json!({"results": []})),
        );
        client.set_auth_token("muse-key").unwrap();

        client
            .search("jobs", Query::from([("page", "1"), ("location", "New York")]))
            .await
            .unwrap();

        let (_, query) = &client.fetcher.requests()[0];
        assert_eq!(
            query.iter().collect::<Vec<_>>(),
            vec![("page", "1"), ("location", "New York"), ("api_key", "muse-key")]
        );
    }

    #[tokio::test]
    async fn token_overwrites_caller_value() {
        let client = JobBoardClient::with_fetcher(
            TheMuse::default(),
            RecordingFetcher::answering(json!({"results": []})),
        );
        client.set_auth_token("configured").unwrap();

        client
            .search("posts", Query::from([("api_key", "from-caller"), ("page", "3")]))
            .await
            .unwrap();

        let (_, query) = &client.fetcher.requests()[0];
        assert_eq!(query.get("api_key"), Some("configured"));
        assert_eq!(query.len(), 2);
    }

    #[tokio::test]
    async fn caller_api_key_passes_through_without_token() {
        let client = JobBoardClient::with_fetcher(
            TheMuse::default(),
            RecordingFetcher::answering(json!({"results": []})),
        );

        client
            .search("posts", Query::from([("page", "3"), ("api_key", "from-caller")]))
            .await
            .unwrap();

        let (_, query) = &client.fetcher.requests()[0];
        assert_eq!(query.get("api_key"), Some("from-caller"));
    }

    #[tokio::test]
    async fn find_by_id_sends_only_token() {
        let client = JobBoardClient::with_fetcher(
            TheMuse::default(),
            RecordingFetcher::answering(json!({"id": 11803})),
        );

        client.find_by_id("company_id", "11803").await.unwrap();
        client.set_auth_token("muse-key").unwrap();
        client.find_by_id("company_id", "11803").await.unwrap();
        client.clear_auth_token();
        client.find_by_id("coach_id", "7").await.unwrap();

        let requests = client.fetcher.requests();
        assert_eq!(
            requests[0].0.as_str(),
            "https://themuse.com/api/public/companies/11803"
        );
        assert!(requests[0].1.is_empty());
        assert_eq!(
            requests[1].1.iter().collect::<Vec<_>>(),
            vec![("api_key", "muse-key")]
        );
        assert_eq!(requests[2].0.as_str(), "https://themuse.com/api/public/coaches/7");
        assert!(requests[2].1.is_empty());
    }

    #[tokio::test]
    async fn github_find_by_id_appends_json_suffix() {
        let client = JobBoardClient::with_fetcher(
            Github::default(),
            RecordingFetcher::answering(json!({"id": "abc"})),
        );

        let response = client.find_by_id("job_id", "abc").await.unwrap();

        assert_eq!(response.as_value()["id"], "abc");
        assert_eq!(
            client.fetcher.requests()[0].0.as_str(),
            "https://jobs.github.com/positions/abc.json"
        );
    }

    #[tokio::test]
    async fn dot_segment_ids_never_fetch() {
        let muse = JobBoardClient::with_fetcher(TheMuse::default(), UnreachableFetcher);

        for id in [".", ".."] {
            let error = muse.find_by_id("job_id", id).await.unwrap_err();
            assert!(matches!(error, ApiError::InvalidArgument { .. }));
            assert!(error.is_validation());
        }
    }

    /// Fetcher with its own failure type, reported through `TransportError::Custom`
    #[derive(Debug)]
    struct QuotaFetcher;

    #[derive(Debug, thiserror::Error)]
    #[error("daily quota of {limit} requests exhausted")]
    struct QuotaExhausted {
        limit: u32,
    }

    impl Fetch for QuotaFetcher {
        async fn fetch(&self, _url: &Url, _query: &Query) -> Result<Value, TransportError> {
            Err(TransportError::Custom {
                error: anyhow::Error::new(QuotaExhausted { limit: 500 }),
            })
        }
    }

    #[tokio::test]
    async fn custom_fetch_errors_propagate() {
        let client = JobBoardClient::with_fetcher(TheMuse::default(), QuotaFetcher);

        let error = client
            .search("jobs", Query::from([("page", "1")]))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "daily quota of 500 requests exhausted");
        match error {
            ApiError::Transport(TransportError::Custom { error }) => {
                let quota = error.downcast_ref::<QuotaExhausted>().unwrap();
                assert_eq!(quota.limit, 500);
            }
            other => panic!("Expected Custom transport error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let client = JobBoardClient::with_fetcher(Github::default(), FailingFetcher);

        let error = client.search("jobs", Query::new()).await.unwrap_err();
        assert!(matches!(
            error,
            ApiError::Transport(TransportError::Timeout { timeout_seconds: 1 })
        ));
        assert!(!error.is_validation());
    }

    #[tokio::test]
    async fn iterate_normalizes_envelopes() {
        let github = JobBoardClient::with_fetcher(
            Github::default(),
            RecordingFetcher::answering(json!(["a", "b", "c"])),
        );
        let response = github.search("jobs", Query::new()).await.unwrap();
        let records: Vec<_> = github.iterate(&response).unwrap().collect();
        assert_eq!(records, vec!["a", "b", "c"]);

        let muse = JobBoardClient::with_fetcher(
            TheMuse::default(),
            RecordingFetcher::answering(json!({"page": 1, "results": ["a", "b", "c"]})),
        );
        let response = muse.search("coaches", Query::from([("page", "1")])).await.unwrap();
        let records: Vec<_> = muse.iterate(&response).unwrap().collect();
        assert_eq!(records, vec!["a", "b", "c"]);

        // iterating again reads the same response
        assert_eq!(muse.iterate(&response).unwrap().count(), 3);
    }

    #[test]
    fn client_name() {
        let client = JobBoardClient::with_fetcher(TheMuse::default(), UnreachableFetcher);
        assert_eq!(client.name(), "TheMuse");
        assert_eq!(client.provider().id(), ProviderId::TheMuse);
    }

    #[test]
    fn default_http_client() {
        let client = JobBoardClient::new(Github::default()).unwrap();
        assert_eq!(client.name(), "Github");
    }
}
