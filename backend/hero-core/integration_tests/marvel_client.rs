use crate::helpers::{CHARACTERS_PATH, TEST_API_KEY, characters_body, params};

use hero_core::error::hero_client::HeroClientError;
use hero_core::hero_client::{HeroSource, MarvelClient};

use models::PageLimit;

use std::time::Duration;

use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// MarvelClient::search() against a mocked characters endpoint
// ============================================================================

/// **VALUE**: Verifies the request carries every query parameter under its wire name and
/// that the response envelope decodes into results and total.
///
/// **WHY THIS MATTERS**: The API silently ignores misspelled parameters; a wrong name means
/// unfiltered or wrongly paged results rather than an error.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - `nameStartsWith` / `offset` / `apikey` are renamed or dropped
/// - offset is sent as a page number instead of `page * limit`
/// - extra envelope fields (code, etag, count) break decoding
#[tokio::test]
async fn given_search_term_when_searching_then_sends_wire_params_and_decodes_results() {
    // GIVEN: A characters endpoint expecting page 2 of "spider" at 10 per page
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("apikey", TEST_API_KEY))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .and(query_param("nameStartsWith", "spider"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            23,
            20,
            10,
            &["Spider-Woman (Mattie Franklin)", "Spider-Woman (Jessica Drew)", "Spider-Girl"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = MarvelClient::new(&server.uri()).expect("Failed to build client");

    // WHEN: Searching
    let response = client
        .search(&params("spider", 2, PageLimit::Low))
        .await
        .expect("Search failed");

    // THEN: Results and total come from the data envelope
    assert_eq!(response.total, 23);
    assert_eq!(response.results.len(), 3);
    assert_eq!(response.results[0].name, "Spider-Woman (Mattie Franklin)");
    assert_eq!(response.results[0].comics.items.len(), 1);
    assert_eq!(
        response.results[0].stories.items[0].kind.as_deref(),
        Some("cover")
    );
    assert!(response.results[0].thumbnail.url().is_some());
}

#[tokio::test]
async fn given_empty_search_term_when_searching_then_name_filter_not_sent() {
    // GIVEN: An endpoint that only answers unfiltered requests
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "25"))
        .and(query_param_is_missing("nameStartsWith"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            1562,
            0,
            25,
            &["3-D Man", "A-Bomb (HAS)"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = MarvelClient::new(&server.uri()).expect("Failed to build client");

    // WHEN: Searching with no term
    let response = client
        .search(&params("", 0, PageLimit::Mid))
        .await
        .expect("Search failed");

    // THEN: The unfiltered listing is returned
    assert_eq!(response.total, 1562);
    assert_eq!(response.results[1].name, "A-Bomb (HAS)");
}

#[tokio::test]
async fn given_proxy_base_path_when_searching_then_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/marvel/v1/public/characters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(0, 0, 10, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        MarvelClient::new(&format!("{}/marvel", server.uri())).expect("Failed to build client");

    let response = client
        .search(&params("nobody", 0, PageLimit::Low))
        .await
        .expect("Search failed");

    assert_eq!(response.total, 0);
    assert!(response.results.is_empty());
}

/// **VALUE**: Verifies a slow endpoint surfaces as an HTTP error once the client timeout
/// elapses.
///
/// **WHY THIS MATTERS**: The client timeout is the only timeout in the pipeline; without
/// it a hung request would keep the view in `Loading` forever.
#[tokio::test]
async fn given_slow_endpoint_when_timeout_elapses_then_returns_http_error() {
    // GIVEN: An endpoint slower than the client timeout
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(characters_body(0, 0, 10, &[]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = MarvelClient::with_timeout(&server.uri(), Duration::from_millis(100))
        .expect("Failed to build client");

    // WHEN: Searching
    let result = client.search(&params("hulk", 0, PageLimit::Low)).await;

    // THEN: Transport error, and the API key is not leaked through the message
    match result {
        Err(HeroClientError::Http { message, .. }) => {
            assert!(!message.contains(TEST_API_KEY), "Key leaked: {message}");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
}
