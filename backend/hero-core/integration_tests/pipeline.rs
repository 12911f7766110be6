use crate::helpers::{
    CHARACTERS_PATH, TEST_API_KEY, TEST_DEBOUNCE, api_key, characters_body, wait_for_view,
};

use hero_core::config::{ApiCredentials, HeroSearchConfig};
use hero_core::derived::ViewState;
use hero_core::hero_client::MarvelClient;
use hero_core::pipeline::{HeroSearch, PipelineSettings};

use models::PageLimit;

use std::sync::Arc;

use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// HeroSearch end to end against a mocked characters endpoint
// ============================================================================

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param_is_missing("nameStartsWith"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            1562,
            0,
            10,
            &["3-D Man", "A-Bomb (HAS)", "A.I.M."],
        )))
        .mount(server)
        .await;
}

fn spawn_against(server: &MockServer) -> HeroSearch {
    let client = MarvelClient::new(&server.uri()).expect("Failed to build client");
    HeroSearch::spawn(
        PipelineSettings::new(api_key()).with_debounce(TEST_DEBOUNCE),
        Arc::new(client),
    )
}

/// **VALUE**: Verifies the whole chain from a search call to a rendered view model over
/// real HTTP.
///
/// **WHY THIS MATTERS**: Each stage is unit tested against fakes; this is the only test
/// where the builder's params, the reqwest client and the projector meet.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The builder emits params the client serializes differently than expected
/// - The executor never publishes the decoded response
/// - Pagination flags are derived from stale input
#[tokio::test]
async fn given_running_pipeline_when_searching_then_view_shows_first_page_of_matches() {
    // GIVEN: An endpoint with an unfiltered listing and 23 "spider" matches
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("apikey", TEST_API_KEY))
        .and(query_param("nameStartsWith", "spider"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            23,
            0,
            10,
            &["Spider-dok", "Spider-Girl (Anya Corazon)", "Spider-Ham (Larval Earth)"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let search = spawn_against(&server);
    let mut view = search.subscribe_view();

    // GIVEN: The start-up listing has loaded
    wait_for_view(&mut view, |state| {
        state
            .view_model()
            .is_some_and(|view_model| view_model.total_results == 1562)
    })
    .await;

    // WHEN: Searching
    search.do_search("spider");

    // THEN: First page of matches, previous disabled, next enabled
    let state = wait_for_view(&mut view, |state| {
        matches!(state, ViewState::Ready(view_model) if view_model.search == "spider" && view_model.total_results == 23)
    })
    .await;

    let view_model = state.view_model().expect("Expected a view model");
    assert_eq!(view_model.heroes.len(), 3);
    assert_eq!(view_model.heroes[0].name, "Spider-dok");
    assert_eq!(view_model.display_page, 1);
    assert_eq!(view_model.total_pages, 3);
    assert!(view_model.disable_previous);
    assert!(!view_model.disable_next);

    search.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn given_loaded_results_when_moving_to_next_page_then_offset_advances() {
    // GIVEN: A listing with two pages of "hulk" matches
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("nameStartsWith", "hulk"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            12,
            0,
            10,
            &["Hulk", "Hulk (HAS)"],
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("nameStartsWith", "hulk"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            12,
            10,
            10,
            &["Hulkling", "Hulk (Ultimate)"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let search = spawn_against(&server);
    let mut view = search.subscribe_view();

    search.do_search("hulk");
    wait_for_view(&mut view, |state| {
        matches!(state, ViewState::Ready(view_model) if view_model.search == "hulk" && view_model.total_results == 12)
    })
    .await;

    // WHEN: Moving forward one page
    search.move_page_by(1);

    // THEN: The second page is shown and next is disabled
    let state = wait_for_view(&mut view, |state| {
        matches!(state, ViewState::Ready(view_model) if view_model.heroes.first().is_some_and(|hero| hero.name == "Hulkling"))
    })
    .await;
    let view_model = state.view_model().expect("Expected a view model");
    assert_eq!(view_model.display_page, 2);
    assert_eq!(view_model.total_pages, 2);
    assert!(view_model.disable_next);
    assert!(!view_model.disable_previous);

    // WHEN: Moving past the last page
    search.move_page_by(1);

    // THEN: The page stays put
    assert_eq!(search.input().page, 1);
}

/// **VALUE**: Verifies a failed request reaches the view with its status while the
/// previous results stay visible.
///
/// **WHY THIS MATTERS**: The presentation layer shows an error banner over the last good
/// page instead of blanking the list.
#[tokio::test]
async fn given_loaded_results_when_next_request_rejected_then_view_failed_with_stale_data() {
    // GIVEN: A working listing, but any "x" search is rejected
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("nameStartsWith", "x"))
        .respond_with(ResponseTemplate::new(409).set_body_string(
            r#"{"code":409,"status":"You must not pass an empty value to the nameStartsWith parameter."}"#,
        ))
        .mount(&server)
        .await;

    let search = spawn_against(&server);
    let mut view = search.subscribe_view();
    wait_for_view(&mut view, |state| matches!(state, ViewState::Ready(_))).await;

    // WHEN: Searching for a term the endpoint rejects
    search.do_search("x");

    // THEN: Failed view with status and the previous heroes re-projected
    let state = wait_for_view(&mut view, ViewState::is_failed).await;
    match state {
        ViewState::Failed {
            message,
            status,
            last,
        } => {
            assert_eq!(status, Some(409));
            assert!(!message.contains(TEST_API_KEY));
            let last = last.expect("Expected stale data");
            assert_eq!(last.total_results, 1562);
            assert_eq!(last.search, "x");
        }
        other => panic!("Expected Failed view, got {other:?}"),
    }
}

#[tokio::test]
async fn given_limit_change_when_results_loaded_then_refetches_with_new_page_size() {
    // GIVEN: An endpoint answering page size 100
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            1562,
            0,
            100,
            &["3-D Man"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let search = spawn_against(&server);
    let mut view = search.subscribe_view();
    wait_for_view(&mut view, |state| matches!(state, ViewState::Ready(_))).await;

    // WHEN: Selecting 100 per page from the raw selector value
    search.set_limit_value(100).expect("100 is a supported limit");

    // THEN: 16 pages of 100
    let state = wait_for_view(&mut view, |state| {
        matches!(state, ViewState::Ready(view_model) if view_model.limit == 100 && view_model.heroes.len() == 1)
    })
    .await;
    let view_model = state.view_model().expect("Expected a view model");
    assert_eq!(view_model.total_pages, 16);
    assert_eq!(search.input().limit, PageLimit::High);
}

#[tokio::test]
async fn given_config_and_credentials_when_connecting_then_pipeline_uses_configured_endpoint() {
    // GIVEN: A config pointing at the mock server
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("apikey", TEST_API_KEY))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(characters_body(
            40,
            0,
            25,
            &["Wolverine"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = HeroSearchConfig::default();
    config.api.base_url = server.uri();
    config.search.debounce_ms = 20;
    config.search.default_limit = PageLimit::Mid;
    config.validate().expect("Config should be valid");

    let credentials = ApiCredentials::from_lookup(|_| Some(TEST_API_KEY.to_string()))
        .expect("Credentials should load");

    // WHEN: Connecting
    let search = HeroSearch::connect(&config, &credentials).expect("Failed to connect");
    let mut view = search.subscribe_view();

    // THEN: The start-up page uses the configured limit
    let state = wait_for_view(&mut view, |state| matches!(state, ViewState::Ready(_))).await;
    let view_model = state.view_model().expect("Expected a view model");
    assert_eq!(view_model.limit, 25);
    assert_eq!(view_model.total_pages, 2);
}
