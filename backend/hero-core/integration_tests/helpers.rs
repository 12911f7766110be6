//! Test helpers for the HTTP-backed integration tests.
//!
//! - Marvel-shaped response bodies
//! - Query parameter construction
//! - Waiting on the published view with a deadline

use hero_core::derived::ViewState;

use common::RedactedApiKey;
use models::{PageLimit, QueryParams, QueryParamsBuilder};

use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::watch;

pub const TEST_API_KEY: &str = "integration-public-key";

pub const CHARACTERS_PATH: &str = "/v1/public/characters";

/// Upper bound for anything a test waits on. Real time: wiremock runs on sockets.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Short debounce so the end-to-end tests stay fast.
pub const TEST_DEBOUNCE: Duration = Duration::from_millis(20);

pub fn api_key() -> RedactedApiKey {
    RedactedApiKey::new(TEST_API_KEY)
}

pub fn params(term: &str, page: u32, limit: PageLimit) -> QueryParams {
    QueryParamsBuilder::default()
        .with_api_key(api_key())
        .with_search_term(term)
        .with_page(page)
        .with_limit(limit)
        .build()
        .expect("Failed to build query params")
}

/// One character in the shape the characters endpoint returns it.
pub fn character(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "modified": "2014-04-29T14:18:17-0400",
        "thumbnail": {
            "path": format!("http://i.annihil.us/u/prod/marvel/i/mg/{id}"),
            "extension": "jpg"
        },
        "resourceURI": format!("http://gateway.marvel.com/v1/public/characters/{id}"),
        "comics": {
            "available": 1,
            "returned": 1,
            "collectionURI": format!("http://gateway.marvel.com/v1/public/characters/{id}/comics"),
            "items": [
                {
                    "resourceURI": "http://gateway.marvel.com/v1/public/comics/21366",
                    "name": "Avengers: The Initiative (2007) #14"
                }
            ]
        },
        "series": {
            "available": 0,
            "returned": 0,
            "collectionURI": format!("http://gateway.marvel.com/v1/public/characters/{id}/series"),
            "items": []
        },
        "stories": {
            "available": 1,
            "returned": 1,
            "collectionURI": format!("http://gateway.marvel.com/v1/public/characters/{id}/stories"),
            "items": [
                {
                    "resourceURI": "http://gateway.marvel.com/v1/public/stories/19947",
                    "name": "Cover #19947",
                    "type": "cover"
                }
            ]
        },
        "events": {
            "available": 0,
            "returned": 0,
            "collectionURI": format!("http://gateway.marvel.com/v1/public/characters/{id}/events"),
            "items": []
        },
        "urls": [
            { "type": "detail", "url": "http://marvel.com/characters/74/3-d_man" }
        ]
    })
}

/// Full response envelope including the fields the client ignores.
pub fn characters_body(total: u64, offset: u64, limit: u32, names: &[&str]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| character(1_011_000 + offset + i as u64, name))
        .collect();

    json!({
        "code": 200,
        "status": "Ok",
        "copyright": "© 2024 MARVEL",
        "attributionText": "Data provided by Marvel. © 2024 MARVEL",
        "etag": "f0fbae65eb2f8f28bdeea0a29be8749a4e67acb3",
        "data": {
            "offset": offset,
            "limit": limit,
            "total": total,
            "count": results.len(),
            "results": results
        }
    })
}

/// Wait until the published view satisfies `predicate`, or fail the test.
pub async fn wait_for_view<F>(view: &mut watch::Receiver<ViewState>, predicate: F) -> ViewState
where
    F: FnMut(&ViewState) -> bool,
{
    let state = tokio::time::timeout(WAIT_TIMEOUT, view.wait_for(predicate))
        .await
        .expect("Timed out waiting for view state")
        .expect("View channel closed");
    state.clone()
}
