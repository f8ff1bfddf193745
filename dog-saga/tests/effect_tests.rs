//! Effect tests against a mock Dog CEO server
//!
//! - `DogApi` talks to wiremock instead of dog.ceo
//! - `EffectRunner` results are read back from the task channel
//! - The full cycle goes through `EffectRuntime::dispatch` / `next_action`
//! - `EffectRuntime::run` is driven headless on a `TestBackend`

use std::cell::{Cell, RefCell};
use std::time::Duration;

use dog_saga::{
    Action, AppState, DogApi, DogUi, Effect, EffectRunner, FetchError, FetchPolicy, Phase, reducer,
    watch,
};
use dog_saga_core::testing::StoreHarness;
use dog_saga_core::{EffectContext, EffectRuntime, EffectStore, TaskManager};
use ratatui::{Terminal, backend::TestBackend};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RANDOM_PATH: &str = "/api/breeds/image/random";
const PHOTO: &str = "https://images.dog.ceo/breeds/pug/n02110958_15626.jpg";

async fn mock_server(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn success() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "message": PHOTO, "status": "success" }))
}

fn api_for(server: &MockServer) -> DogApi {
    DogApi::new(format!("{}{}", server.uri(), RANDOM_PATH))
}

#[tokio::test]
async fn test_fetch_random_success() {
    let server = mock_server(success()).await;

    let api = api_for(&server);
    assert!(api.endpoint().ends_with(RANDOM_PATH));

    let url = api.fetch_random().await.expect("fetch");
    assert_eq!(url, PHOTO);
}

#[tokio::test]
async fn test_fetch_random_http_error() {
    let server = mock_server(ResponseTemplate::new(500)).await;

    match api_for(&server).fetch_random().await {
        Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_random_bad_json() {
    let server = mock_server(ResponseTemplate::new(200).set_body_string("<html>")).await;

    let result = api_for(&server).fetch_random().await;
    assert!(matches!(result, Err(FetchError::Decode(_))), "{:?}", result);
}

#[tokio::test]
async fn test_fetch_random_api_error_status() {
    let server = mock_server(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "message": "Breed not found", "status": "error" })),
    )
    .await;

    let result = api_for(&server).fetch_random().await;
    assert!(matches!(result, Err(FetchError::Api { .. })), "{:?}", result);
}

#[tokio::test]
async fn test_runner_sends_did_load() {
    let server = mock_server(success()).await;
    let runner = EffectRunner::new(api_for(&server), FetchPolicy::Concurrent);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);
    runner.handle(Effect::FetchDog, &mut tasks);

    assert_eq!(rx.recv().await, Some(Action::DogDidLoad(PHOTO.into())));
}

#[tokio::test]
async fn test_runner_sends_did_error() {
    let server = mock_server(ResponseTemplate::new(503)).await;
    let runner = EffectRunner::new(api_for(&server), FetchPolicy::Concurrent);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);
    runner.handle(Effect::FetchDog, &mut tasks);

    match rx.recv().await {
        Some(Action::DogDidError(message)) => assert!(message.contains("503"), "{}", message),
        other => panic!("Expected DogDidError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_requests_all_complete() {
    let server = mock_server(success().set_delay(Duration::from_millis(50))).await;
    let runner = EffectRunner::new(api_for(&server), FetchPolicy::Concurrent);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);
    runner.handle(Effect::FetchDog, &mut tasks);
    runner.handle(Effect::FetchDog, &mut tasks);

    assert!(matches!(rx.recv().await, Some(Action::DogDidLoad(_))));
    assert!(matches!(rx.recv().await, Some(Action::DogDidLoad(_))));
}

#[tokio::test]
async fn test_latest_only_aborts_superseded_request() {
    let server = mock_server(success().set_delay(Duration::from_millis(100))).await;
    let runner = EffectRunner::new(api_for(&server), FetchPolicy::LatestOnly);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);
    runner.handle(Effect::FetchDog, &mut tasks);
    runner.handle(Effect::FetchDog, &mut tasks);

    assert!(matches!(rx.recv().await, Some(Action::DogDidLoad(_))));
    let second = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
    assert!(second.is_err(), "superseded request still sent {:?}", second);
}

fn effect_handler(runner: &EffectRunner) -> impl FnMut(Effect, &mut EffectContext<Action>) + '_ {
    move |effect, ctx| runner.handle(effect, ctx.tasks())
}

#[tokio::test]
async fn test_runtime_full_cycle() {
    let server = mock_server(success()).await;
    let runner = EffectRunner::new(api_for(&server), FetchPolicy::Concurrent);
    let mut handle_effect = effect_handler(&runner);

    let store = EffectStore::new(AppState::default(), reducer, watch);
    let mut runtime = EffectRuntime::from_store(store);

    assert!(runtime.dispatch(Action::DogFetch, &mut handle_effect));
    assert_eq!(runtime.state().phase(), Phase::Fetching);
    assert!(runtime.needs_render());

    let result = runtime.next_action().await.expect("result action");
    assert_eq!(result, Action::DogDidLoad(PHOTO.into()));

    assert!(runtime.dispatch(result, &mut handle_effect));
    assert_eq!(
        runtime.state(),
        &AppState {
            fetching: false,
            photo: Some(PHOTO.into()),
            error: None,
        }
    );
}

#[tokio::test]
async fn test_run_quit_aborts_in_flight_fetch() {
    let server = mock_server(success().set_delay(Duration::from_secs(30))).await;
    let runner = EffectRunner::new(api_for(&server), FetchPolicy::Concurrent);

    let store = EffectStore::new(AppState::default(), reducer, watch);
    let mut runtime = EffectRuntime::from_store(store);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("test terminal");
    let ui = RefCell::new(DogUi::new());
    let renders = Cell::new(0);

    runtime.enqueue(Action::DogFetch);
    runtime.enqueue(Action::Quit);
    runtime
        .run(
            &mut terminal,
            |frame, area, state| {
                renders.set(renders.get() + 1);
                ui.borrow_mut().render(frame, area, state);
            },
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            effect_handler(&runner),
        )
        .await
        .expect("run");

    assert!(renders.get() >= 1);
    assert!(runtime.state().fetching);
    assert!(runtime.tasks().is_empty());

    let late = tokio::time::timeout(Duration::from_millis(200), runtime.next_action()).await;
    assert!(late.is_err(), "aborted fetch still reported {:?}", late);
}

#[test]
fn test_request_success_request_failure_sequence() {
    let mut harness = StoreHarness::new(AppState::default(), reducer, watch);

    let effects = harness.dispatch_all([
        Action::DogFetch,
        Action::DogDidLoad(PHOTO.into()),
        Action::DogFetch,
        Action::DogDidError("boom".into()),
    ]);

    assert_eq!(effects, vec![Effect::FetchDog, Effect::FetchDog]);
    assert_eq!(harness.notifications(), 4);
    assert_eq!(
        harness.state(),
        &AppState {
            fetching: false,
            photo: Some(PHOTO.into()),
            error: Some("boom".into()),
        }
    );
    assert_eq!(harness.state().phase(), Phase::Error);
}

#[test]
fn test_unrelated_actions_still_notify() {
    let mut harness = StoreHarness::new(AppState::default(), reducer, watch);

    let result = harness.dispatch(Action::UiTerminalResize(80, 24));
    assert!(!result.changed);
    assert!(!result.has_effects());
    assert_eq!(harness.notifications(), 1);
}
