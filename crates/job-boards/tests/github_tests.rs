// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the Github Jobs client
//!
//! These tests use wiremock to mock the job board and check what actually goes over
//! the wire.

use board_client::{ApiError, Query, TransportError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

use fixtures::*;

/// Test a search with description, location and full time
#[tokio::test]
async fn search_success() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/positions.json"))
        .and(query_param("description", "Software Engineer"))
        .and(query_param("location", "New York City"))
        .and(query_param("full_time", "true"))
        .and(header("user-agent", TEST_USER_AGENT))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_positions()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = Query::new()
        .with("description", "Software Engineer")
        .with("location", "New York City")
        .with("full_time", "true");
    let response = client.search("jobs", query).await.unwrap();

    let titles: Vec<_> = client
        .iterate(&response)
        .unwrap()
        .map(|job| job["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Senior Software Engineer", "Software Engineer"]);
}

/// Test that parameters are sent in the order they were given
#[tokio::test]
async fn search_preserves_parameter_order() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    let query = Query::new()
        .with("page", 2)
        .with("lat", "40.7128")
        .with("long", "-74.0060")
        .with("description", "rust");

    Mock::given(method("GET"))
        .and(path("/positions.json"))
        .and(ExactQuery::of(&query))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_positions()))
        .expect(1)
        .mount(&mock_server)
        .await;

    client.search("jobs", query).await.unwrap();
}

/// Test that a search without parameters is sent without a query string
#[tokio::test]
async fn search_without_parameters() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/positions.json"))
        .and(NoQuery)
        .respond_with(ResponseTemplate::new(200).set_body_json(github_positions()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.search("jobs", Query::new()).await.unwrap();
    assert_eq!(client.iterate(&response).unwrap().len(), 2);
}

/// Test that invalid queries are rejected before any request
#[tokio::test]
async fn invalid_queries_send_nothing() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_positions()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let error = client
        .search(
            "jobs",
            Query::from([("description", "Software Engineer"), ("lat", "40.7128")]),
        )
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::CrossFieldValidation { .. }));

    let error = client
        .search(
            "jobs",
            Query::from([
                ("location", "New York City"),
                ("lat", "40.7128"),
                ("long", "74.0060"),
            ]),
        )
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::CrossFieldValidation { .. }));

    let error = client
        .search(
            "jobs",
            Query::from([
                ("description", "Software Engineer"),
                ("location", "New York City"),
                ("invalidparameter", "Despacito"),
            ]),
        )
        .await
        .unwrap_err();
    match error {
        ApiError::UnsupportedField { field, .. } => assert_eq!(field, "invalidparameter"),
        other => panic!("Expected UnsupportedField error, got: {other:?}"),
    }

    let error = client.search("companies", Query::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::UnknownEndpoint { .. }));
}

/// Test a single position lookup
#[tokio::test]
async fn find_by_id_success() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);
    let id = "c8b9e1f2-1d4a-4c35-9f0e-6b7a1d2e3f40";

    Mock::given(method("GET"))
        .and(path(format!("/positions/{id}.json")))
        .and(NoQuery)
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_position(id)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client.find_by_id("job_id", id).await.unwrap();
    assert_eq!(response.as_value()["id"], id);
}

/// Test that a lookup response is not iterable as a listing
#[tokio::test]
async fn lookup_response_is_not_a_listing() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/positions/abc.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_position("abc")))
        .mount(&mock_server)
        .await;

    let response = client.find_by_id("job_id", "abc").await.unwrap();
    assert!(matches!(
        client.iterate(&response),
        Err(ApiError::UnexpectedEnvelope { .. })
    ));
}

/// Test server error
#[tokio::test]
async fn search_server_error() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/positions.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let error = client.search("jobs", Query::new()).await.unwrap_err();
    match error {
        ApiError::Transport(TransportError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected Status error, got: {other:?}"),
    }
}

/// Test not found
#[tokio::test]
async fn find_by_id_not_found() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/positions/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let error = client.find_by_id("job_id", "missing").await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::Transport(TransportError::Status { status: 404, .. })
    ));
    assert!(!error.is_validation());
}

/// Test a body that is not JSON
#[tokio::test]
async fn search_invalid_json() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/positions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let error = client.search("jobs", Query::new()).await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::Transport(TransportError::InvalidResponse { .. })
    ));
}

/// Test the client name
#[tokio::test]
async fn client_name() {
    let mock_server = MockServer::start().await;
    let client = github_client(&mock_server);
    assert_eq!(client.name(), "Github");
}
