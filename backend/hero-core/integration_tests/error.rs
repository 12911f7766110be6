use crate::helpers::{CHARACTERS_PATH, TEST_API_KEY, params};

use hero_core::error::hero_client::HeroClientError;
use hero_core::hero_client::{HeroSource, MarvelClient};

use common::HttpStatusCode;
use models::PageLimit;

use std::net::TcpListener;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that a rejected key surfaces as a `Server` error with status 401.
///
/// **WHY THIS MATTERS**: A missing or invalid public key is the most common failure in
/// practice; the view needs the status to tell "bad credentials" from "API down".
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Non-success statuses are decoded as if they were results
/// - The status code is dropped from the error
#[tokio::test]
async fn given_rejected_key_when_searching_then_returns_server_error_with_status() {
    // GIVEN: An endpoint rejecting the key
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"code":"InvalidCredentials","message":"The passed API key is invalid."}"#,
        ))
        .mount(&server)
        .await;

    let client = MarvelClient::new(&server.uri()).expect("Failed to build client");

    // WHEN: Searching
    let error = client
        .search(&params("thor", 0, PageLimit::Low))
        .await
        .expect_err("Expected failure");

    // THEN: Server error carrying 401 and the response body
    assert_eq!(error.status(), Some(HttpStatusCode(401)));
    assert!(error.status().is_some_and(|status| status.is_auth_failure()));
    match &error {
        HeroClientError::Server { message, .. } => {
            assert!(message.contains("InvalidCredentials"))
        }
        other => panic!("Expected Server error, got {other:?}"),
    }
    assert!(!error.to_string().contains(TEST_API_KEY));
}

#[tokio::test]
async fn given_server_failure_when_searching_then_status_classified_as_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = MarvelClient::new(&server.uri()).expect("Failed to build client");

    let error = client
        .search(&params("", 0, PageLimit::Low))
        .await
        .expect_err("Expected failure");

    let status = error.status().expect("Expected a status");
    assert!(status.is_server_error());
    assert!(!status.is_client_error());
}

/// **VALUE**: Verifies that a 200 with an unexpected body is a `Json` error, not a panic or
/// an empty result.
///
/// **BUG THIS CATCHES**: Would catch decoding falling back to `RawResponse::default()`,
/// which would render "0 results" for a broken API.
#[tokio::test]
async fn given_malformed_body_when_searching_then_returns_json_error() {
    // GIVEN: A success status with a body missing the data envelope
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":200,"status":"Ok"}"#))
        .mount(&server)
        .await;

    let client = MarvelClient::new(&server.uri()).expect("Failed to build client");

    // WHEN: Searching
    let error = client
        .search(&params("loki", 0, PageLimit::Low))
        .await
        .expect_err("Expected failure");

    // THEN: Decode failure, no status
    assert!(matches!(error, HeroClientError::Json { .. }));
    assert_eq!(error.status(), None);
    assert!(error.to_string().contains("JSON Error"));
}

/// **VALUE**: Verifies that a refused connection surfaces as an `Http` transport error.
///
/// **WHY THIS MATTERS**: This is the only path through `From<reqwest::Error>`, which strips
/// the request URL so the API key never ends up in logs or the view.
///
/// **BUG THIS CATCHES**: Would catch transport failures being reported with the full URL,
/// or being misclassified as a server response.
#[tokio::test]
async fn given_unreachable_host_when_searching_then_returns_http_error() {
    // GIVEN: A local port nothing listens on any more
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let address = listener.local_addr().expect("Failed to read listener address");
    drop(listener);

    let client =
        MarvelClient::new(&format!("http://{address}")).expect("Failed to build client");

    // WHEN: Searching
    let error = client
        .search(&params("", 0, PageLimit::Low))
        .await
        .expect_err("Expected failure");

    // THEN: Transport error without the key-bearing URL
    assert!(matches!(error, HeroClientError::Http { .. }), "{error:?}");
    assert!(error.to_string().contains("HTTP Error"));
    assert!(!error.to_string().contains(TEST_API_KEY));
    assert_eq!(error.status(), None);
}
