use crate::{InputState, ModelError, PageLimit, QueryParamsBuilder};

use common::RedactedApiKey;

fn key() -> RedactedApiKey {
    RedactedApiKey::new("public-key")
}

/// **VALUE**: Verifies a "spider" search on the first page of ten.
///
/// **WHY THIS MATTERS**: This is the canonical request shape the search API expects.
///
/// **BUG THIS CATCHES**: Would catch a wrong offset or a missing `nameStartsWith`.
#[test]
fn given_search_term_on_first_page_when_building_then_offset_zero_and_name_filter_set() {
    // GIVEN: search "spider", page 0, limit 10
    let builder = QueryParamsBuilder::default()
        .with_api_key(key())
        .with_search_term("spider")
        .with_page(0)
        .with_limit(PageLimit::Low);

    // WHEN: Building
    let params = builder.build().unwrap();

    // THEN: offset 0, limit 10, name filter present
    assert_eq!(params.offset, 0);
    assert_eq!(params.limit, 10);
    assert_eq!(params.name_starts_with.as_deref(), Some("spider"));
}

/// **VALUE**: Verifies that an empty search term is dropped from the parameters.
///
/// **WHY THIS MATTERS**: An empty `nameStartsWith` is rejected by the API. The browse
/// mode (no term) must send no name filter at all.
#[test]
fn given_empty_search_term_when_building_then_name_filter_absent() {
    let params = QueryParamsBuilder::default()
        .with_api_key(key())
        .with_search_term("")
        .with_page(3)
        .with_limit(PageLimit::Mid)
        .build()
        .unwrap();

    assert_eq!(params.name_starts_with, None);
    assert_eq!(params.offset, 75);

    let pairs = params.query_pairs();
    assert!(pairs.iter().all(|(name, _)| *name != "nameStartsWith"));
}

#[test]
fn given_input_state_when_building_then_offset_is_page_times_limit() {
    for limit in PageLimit::ALL {
        for page in [0_u32, 1, 2, 17] {
            let input = InputState {
                search_term: String::from("hulk"),
                page,
                limit,
            };

            let params = QueryParamsBuilder::default()
                .with_api_key(key())
                .with_input(&input)
                .build()
                .unwrap();

            assert_eq!(params.offset, u64::from(page) * u64::from(limit.value()));
            assert_eq!(params.offset, input.offset());
        }
    }
}

/// **VALUE**: Verifies structural equality of parameters built from equal inputs.
///
/// **WHY THIS MATTERS**: Deduplication compares `QueryParams` with `==`. Two builds of the
/// same input must be equal or every keystroke that lands on the same state refires.
#[test]
fn given_same_inputs_when_built_twice_then_params_are_equal() {
    let input = InputState {
        search_term: String::from("thor"),
        page: 1,
        limit: PageLimit::Low,
    };

    let first = QueryParamsBuilder::default().with_api_key(key()).with_input(&input).build().unwrap();
    let second = QueryParamsBuilder::default().with_api_key(key()).with_input(&input).build().unwrap();
    let other_page = QueryParamsBuilder::default()
        .with_api_key(key())
        .with_input(&input)
        .with_page(2)
        .build()
        .unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other_page);
}

#[test]
fn given_params_when_query_pairs_taken_then_wire_names_in_order() {
    let params = QueryParamsBuilder::default()
        .with_api_key(key())
        .with_search_term("iron")
        .with_page(2)
        .with_limit(PageLimit::Low)
        .build()
        .unwrap();

    let pairs = params.query_pairs();

    assert_eq!(
        pairs,
        vec![
            ("apikey", String::from("public-key")),
            ("limit", String::from("10")),
            ("offset", String::from("20")),
            ("nameStartsWith", String::from("iron")),
        ]
    );
}

#[test]
fn given_missing_api_key_when_building_then_returns_validation_error() {
    let result = QueryParamsBuilder::default()
        .with_page(0)
        .with_limit(PageLimit::Low)
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => assert_eq!(message, "API key is required"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_blank_api_key_when_building_then_returns_validation_error() {
    let result = QueryParamsBuilder::default()
        .with_api_key(RedactedApiKey::new("  "))
        .with_limit(PageLimit::Low)
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => assert_eq!(message, "API key cannot be empty"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_limit_when_building_then_returns_validation_error() {
    let result = QueryParamsBuilder::default().with_api_key(key()).build();

    match result {
        Err(ModelError::Validation { message, .. }) => assert_eq!(message, "Limit is required"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}
