// Unit tests for the query executor: switch-to-latest, replay cache, failures.

use crate::error::hero_client::HeroClientError;
use crate::executor::{Completion, QueryExecutor, ResponseState, accept_completion};
use crate::tests::support::{FakeSource, label, ms, params};

use common::ErrorLocation;
use models::{PageLimit, RawResponse};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

fn start(source: Arc<FakeSource>) -> (mpsc::Sender<models::QueryParams>, watch::Receiver<ResponseState>) {
    let (executor, responses) = QueryExecutor::new(source);
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(executor.run(rx));
    (tx, responses)
}

#[tokio::test(start_paused = true)]
async fn given_params_when_request_completes_then_response_cached_as_loaded() {
    let source = Arc::new(FakeSource::new(23));
    let (tx, responses) = start(Arc::clone(&source));
    let spider = params("spider", 0, PageLimit::Low);

    tx.send(spider.clone()).await.unwrap();
    sleep(ms(1)).await;

    match &*responses.borrow() {
        ResponseState::Loaded { params, response } => {
            assert_eq!(params, &spider);
            assert_eq!(response.total, 23);
            assert_eq!(response.results[0].name, label(&spider));
        }
        other => panic!("Expected Loaded, got {other:?}"),
    }
    assert_eq!(source.calls(), vec![spider]);
}

/// **VALUE**: Verifies that a slow, superseded request never reaches subscribers,
/// even though it would have resolved before the newer one.
///
/// **WHY THIS MATTERS**: Without switch-to-latest, typing "sp" then "spider" could show
/// results for "sp" under a search box that says "spider" whenever the older request
/// happens to answer later (or, as here, the newer one is slower).
///
/// **BUG THIS CATCHES**: Would catch a missing abort/generation check, where R1's
/// response overwrites the cache while R2 is still in flight.
#[tokio::test(start_paused = true)]
async fn given_superseded_request_when_it_resolves_first_then_only_latest_delivered() {
    // GIVEN: R1 takes 200ms, R2 takes 400ms
    let source = Arc::new(FakeSource::new(5).with_latencies(vec![ms(200), ms(400)]));
    let (tx, mut responses) = start(Arc::clone(&source));
    let first = params("sp", 0, PageLimit::Low);
    let second = params("spider", 0, PageLimit::Low);

    // WHEN: P1 issued, then P2 50ms later (R1 still pending)
    tx.send(first.clone()).await.unwrap();
    sleep(ms(50)).await;
    tx.send(second.clone()).await.unwrap();

    // THEN: At t=300 R1 would have resolved, yet the cache is still loading P2
    sleep(ms(250)).await;
    {
        let state = responses.borrow_and_update();
        assert!(state.is_loading(), "Expected Loading, got {:?}", *state);
        assert_eq!(state.params(), Some(&second));
        assert!(state.latest_response().is_none(), "R1 must not be cached");
    }

    // THEN: At t=500 R2 is delivered
    sleep(ms(200)).await;
    match &*responses.borrow() {
        ResponseState::Loaded { params, response } => {
            assert_eq!(params, &second);
            assert_eq!(response.results[0].name, label(&second));
        }
        other => panic!("Expected Loaded for P2, got {other:?}"),
    }
    assert_eq!(source.calls(), vec![first, second]);
}

/// **VALUE**: Verifies the generation guard on its own, for completions that race the abort.
///
/// **WHY THIS MATTERS**: `abort()` cannot stop a task that already sent its completion.
/// The generation check is what actually guarantees latest-wins in that window.
#[test]
fn given_stale_generation_when_completion_arrives_then_discarded() {
    let (cache, receiver) = watch::channel(ResponseState::Idle);
    let stale = Completion {
        generation: 1,
        params: params("sp", 0, PageLimit::Low),
        result: Ok(RawResponse::default()),
    };

    let accepted = accept_completion(&cache, stale, 2);

    assert!(!accepted);
    assert!(matches!(*receiver.borrow(), ResponseState::Idle));
}

#[test]
fn given_current_generation_when_completion_arrives_then_published() {
    let (cache, receiver) = watch::channel(ResponseState::Idle);
    let current = Completion {
        generation: 2,
        params: params("spider", 0, PageLimit::Low),
        result: Ok(RawResponse {
            total: 7,
            results: Vec::new(),
        }),
    };

    assert!(accept_completion(&cache, current, 2));
    assert_eq!(receiver.borrow().latest_response().unwrap().total, 7);
}

/// **VALUE**: Verifies the replay cache: a late subscriber gets the last response at once
/// and subscribing issues no request.
///
/// **BUG THIS CATCHES**: Would catch a cache that only notifies on change (late
/// subscribers see nothing) or a per-subscriber fetch.
#[tokio::test(start_paused = true)]
async fn given_loaded_cache_when_new_consumer_subscribes_then_replayed_without_request() {
    let source = Arc::new(FakeSource::new(3));
    let (tx, responses) = start(Arc::clone(&source));
    tx.send(params("", 0, PageLimit::Low)).await.unwrap();
    sleep(ms(1)).await;

    let late_a = responses.clone();
    let late_b = responses.clone();
    sleep(ms(1_000)).await;

    assert_eq!(late_a.borrow().latest_response().unwrap().total, 3);
    assert_eq!(late_b.borrow().latest_response().unwrap().total, 3);
    assert_eq!(source.calls().len(), 1);
}

/// **VALUE**: Verifies that a failure is surfaced as-is, without retry, and keeps the
/// last good response.
///
/// **WHY THIS MATTERS**: The view needs something to show next to the error; dropping
/// the previous page would blank the table on a transient 503.
#[tokio::test(start_paused = true)]
async fn given_failing_request_when_completed_then_failed_state_keeps_last_response() {
    let source = Arc::new(FakeSource::new(12).failing_for("doom"));
    let (tx, responses) = start(Arc::clone(&source));

    tx.send(params("", 0, PageLimit::Low)).await.unwrap();
    sleep(ms(1)).await;
    tx.send(params("doom", 0, PageLimit::Low)).await.unwrap();
    sleep(ms(1_000)).await;

    match &*responses.borrow() {
        ResponseState::Failed { params, error, last } => {
            assert_eq!(params.name_starts_with.as_deref(), Some("doom"));
            assert!(matches!(**error, HeroClientError::Server { .. }));
            assert_eq!(error.status().map(|s| s.0), Some(503));
            assert_eq!(last.as_ref().unwrap().total, 12);
        }
        other => panic!("Expected Failed, got {other:?}"),
    }
    assert_eq!(source.calls().len(), 2, "No retry on failure");
}

#[test]
fn given_failure_without_prior_response_when_published_then_last_is_none() {
    let (cache, receiver) = watch::channel(ResponseState::Idle);
    let failed = Completion {
        generation: 1,
        params: params("doom", 0, PageLimit::Low),
        result: Err(HeroClientError::Http {
            message: String::from("connection refused"),
            location: ErrorLocation::caller(),
        }),
    };

    accept_completion(&cache, failed, 1);

    let state = receiver.borrow();
    assert!(state.error().is_some());
    assert!(state.latest_response().is_none());
    assert_eq!(state.error().unwrap().status(), None);
}
