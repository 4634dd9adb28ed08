//! Integration tests for the async loading pipeline: machine + loading
//! actions + loaders, end to end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use foodwatch::{
    AppInput, AppMachine, AppState, FakeLoader, LoadError, LoaderAction, LoadingAction, Record,
    RecordsLoader, SodaLoader, Transition,
};
use tokio::sync::mpsc;
use tokio::sync::Notify;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_records() -> Vec<Record> {
    vec![
        Record {
            title: "Inspection 1".to_string(),
            address: "1 N State St".to_string(),
            inspection_date: None,
        },
        Record {
            title: "Inspection 2".to_string(),
            address: "200 S Michigan Ave".to_string(),
            inspection_date: None,
        },
    ]
}

/// Forward every published transition into a channel the test can await.
fn watch(machine: &AppMachine) -> (mpsc::UnboundedReceiver<Transition>, foodwatch::Subscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sub = machine.subscribe(move |transition| {
        let _ = tx.send(transition.clone());
    });
    (rx, sub)
}

/// Await transitions until one matches, failing the test after five seconds.
async fn wait_for(
    rx: &mut mpsc::UnboundedReceiver<Transition>,
    matches: impl Fn(&AppState) -> bool,
) -> Transition {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let transition = rx.recv().await.expect("machine dropped");
            if matches(&transition.state) {
                return transition;
            }
        }
    })
    .await
    .expect("timed out waiting for state")
}

struct FailingLoader;

#[async_trait]
impl RecordsLoader for FailingLoader {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        Err(LoadError::loader("stub failure"))
    }
}

struct CountingLoader {
    calls: AtomicUsize,
}

#[async_trait]
impl RecordsLoader for CountingLoader {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(sample_records())
    }
}

/// Holds its (failing) result until the test opens the gate.
struct GatedLoader {
    gate: Arc<Notify>,
}

#[async_trait]
impl RecordsLoader for GatedLoader {
    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        self.gate.notified().await;
        Err(LoadError::loader("late failure"))
    }
}

fn action(loader: impl RecordsLoader + 'static) -> Arc<dyn LoadingAction> {
    Arc::new(LoaderAction::new(Arc::new(loader)))
}

#[tokio::test]
async fn construction_triggers_fetch_and_failure_surfaces() {
    let machine = AppMachine::new(vec![action(FailingLoader)]);
    let (mut rx, _sub) = watch(&machine);

    let failed = wait_for(&mut rx, |s| matches!(s, AppState::Failed(_))).await;
    assert_eq!(
        failed.state.error().map(|e| e.to_string()),
        Some("stub failure".to_string())
    );
    assert!(matches!(failed.input, Some(AppInput::Fail(_))));
}

#[tokio::test]
async fn successful_fetch_loads_records() {
    let machine = AppMachine::new(vec![action(FakeLoader::new())]);
    let (mut rx, _sub) = watch(&machine);

    let loaded = wait_for(&mut rx, |s| matches!(s, AppState::Loaded(_))).await;
    let records = loaded.state.records().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].title, "Inspection 1");
}

#[tokio::test]
async fn refresh_runs_a_second_fetch() {
    let loader = Arc::new(CountingLoader {
        calls: AtomicUsize::new(0),
    });
    let machine = AppMachine::new(vec![Arc::new(LoaderAction::new(loader.clone()))
        as Arc<dyn LoadingAction>]);
    let (mut rx, _sub) = watch(&machine);

    wait_for(&mut rx, |s| matches!(s, AppState::Loaded(_))).await;
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);

    machine.send(AppInput::Refresh);
    wait_for(&mut rx, |s| matches!(s, AppState::Loading)).await;
    wait_for(&mut rx, |s| matches!(s, AppState::Loaded(_))).await;
    assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_fetch_recovers_after_refresh() {
    struct FailOnce {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecordsLoader for FailOnce {
        async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(LoadError::loader("first fetch failure"))
            } else {
                Ok(sample_records())
            }
        }
    }

    let machine = AppMachine::new(vec![action(FailOnce {
        calls: AtomicUsize::new(0),
    })]);
    let (mut rx, _sub) = watch(&machine);

    wait_for(&mut rx, |s| matches!(s, AppState::Failed(_))).await;
    machine.send(AppInput::Refresh);
    let loaded = wait_for(&mut rx, |s| matches!(s, AppState::Loaded(_))).await;
    assert_eq!(loaded.state.records().unwrap(), sample_records().as_slice());
}

#[tokio::test]
async fn late_result_from_losing_action_is_ignored() {
    let gate = Arc::new(Notify::new());
    let machine = AppMachine::new(vec![
        action(FakeLoader::new()),
        action(GatedLoader {
            gate: Arc::clone(&gate),
        }),
    ]);
    let (mut rx, _sub) = watch(&machine);

    wait_for(&mut rx, |s| matches!(s, AppState::Loaded(_))).await;

    // Let the gated loader deliver its failure now that the episode is over.
    gate.notify_one();
    let extra = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(extra.is_err(), "stale failure must not be published");
    assert!(matches!(machine.current().state, AppState::Loaded(_)));
}

const SODA_FIXTURE: &str = r#"[
    {
        "dba_name": "Corner Bakery",
        "address": "1 N State St",
        "inspection_date": "2025-04-29T00:00:00.000",
        "results": "Pass"
    },
    {
        "dba_name": "Lakeview Deli",
        "address": "800 W North Ave"
    }
]"#;

#[tokio::test]
async fn soda_loader_decodes_wire_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/food.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SODA_FIXTURE, "application/json"))
        .mount(&server)
        .await;

    let loader = SodaLoader::new(format!("{}/resource/food.json", server.uri())).unwrap();
    let records = loader.fetch().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Corner Bakery");
    assert_eq!(records[0].address, "1 N State St");
    assert_eq!(
        records[0]
            .inspection_date
            .map(|d| d.date().to_string())
            .as_deref(),
        Some("2025-04-29")
    );
    assert!(records[1].inspection_date.is_none());
}

#[tokio::test]
async fn soda_loader_surfaces_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let loader = SodaLoader::new(server.uri()).unwrap();
    assert!(matches!(loader.fetch().await, Err(LoadError::Http(_))));
}

#[tokio::test]
async fn soda_loader_surfaces_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let loader = SodaLoader::new(server.uri()).unwrap();
    assert!(matches!(loader.fetch().await, Err(LoadError::Decode(_))));
}

#[tokio::test]
async fn soda_loader_surfaces_bad_dates() {
    let server = MockServer::start().await;
    let body = r#"[{"dba_name": "X", "address": "Y", "inspection_date": "April 29th"}]"#;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let loader = SodaLoader::new(server.uri()).unwrap();
    assert!(matches!(loader.fetch().await, Err(LoadError::Date(_))));
}

#[tokio::test]
async fn soda_fetch_drives_machine_through_loader_action() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SODA_FIXTURE, "application/json"))
        .mount(&server)
        .await;

    let loader = SodaLoader::new(server.uri()).unwrap();
    let machine = AppMachine::new(vec![action(loader)]);
    let (mut rx, _sub) = watch(&machine);

    let loaded = wait_for(&mut rx, |s| matches!(s, AppState::Loaded(_))).await;
    assert_eq!(loaded.state.records().unwrap().len(), 2);
}
