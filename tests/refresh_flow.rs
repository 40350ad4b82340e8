//! End-to-end flow: import a services document the way the shell does,
//! drive the refresh over synthetic timestamps, and check the events the
//! presentation layer would receive.

use std::sync::Arc;

use tokio::sync::Mutex;

use authdeck::otp::registry::ServiceRegistry;
use authdeck::otp::scheduler::RefreshScheduler;
use authdeck::otp::service::AuthService;
use authdeck::otp::storage;
use authdeck::otp::types::RefreshEvent;

const DOCUMENT: &str = r##"{
    "services": [
        {
            "name": "Example",
            "secret": "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ",
            "icon": {"label": {"text": "Ex", "backgroundColor": "#336699"}}
        },
        {
            "name": "Wide",
            "secret": "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ",
            "otp": {"digits": 8, "period": 60}
        },
        {
            "name": "Placeholder"
        }
    ]
}"##;

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<RefreshEvent>) -> Vec<RefreshEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn import_tick_and_events() {
    let dir = tempfile::tempdir().unwrap();
    let state = AuthService::with_data_path(dir.path().join(storage::DATA_FILE));
    let mut service = state.lock().await;
    assert_eq!(service.import(DOCUMENT.as_bytes()).await.unwrap(), 3);

    // Drive a scheduler over the same document with explicit timestamps.
    let mut registry = ServiceRegistry::new();
    registry.replace(ServiceRegistry::load(DOCUMENT.as_bytes()).unwrap());
    let registry = Arc::new(Mutex::new(registry));
    let (mut scheduler, mut rx) = RefreshScheduler::new(registry);

    scheduler.tick(59).await;
    let events = drain(&mut rx);
    assert_eq!(events.len(), 3);

    // Service 0: the RFC 6238 reference vector, grouped in threes.
    assert_eq!(events[0].formatted_token.as_deref(), Some("287 082"));
    assert_eq!(events[0].seconds_remaining, 1);

    // Service 1: 8 digits over a 60 s period, grouped in fours.
    let wide = events[1].formatted_token.as_deref().unwrap();
    assert_eq!(wide.len(), 9);
    assert_eq!(wide.as_bytes()[4], b' ');
    assert_eq!(events[1].seconds_remaining, 1);

    // Service 2: no secret, stays blank without erroring the tick.
    assert_eq!(events[2].formatted_token, None);

    // One second later the 30 s window rolled over, the 60 s one did too
    // (59 → 60), and the placeholder still reports only its countdown.
    scheduler.tick(60).await;
    let events = drain(&mut rx);
    assert_eq!(events.len(), 3);
    assert_ne!(events[0].formatted_token.as_deref(), Some("287 082"));
    assert!(events[0].formatted_token.is_some());
    assert!(events[1].formatted_token.is_some());
    assert_eq!(events[0].seconds_remaining, 30);
    assert_eq!(events[1].seconds_remaining, 60);
    assert_eq!(events[2].formatted_token, None);

    // Mid-window: countdowns only.
    scheduler.tick(61).await;
    let events = drain(&mut rx);
    assert!(events.iter().all(|e| e.formatted_token.is_none()));
    assert_eq!(events[0].seconds_remaining, 29);
    assert_eq!(events[0].progress_percent, 100.0 / 30.0);
}

#[tokio::test]
async fn import_then_restart_recovers_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(storage::DATA_FILE);

    {
        let state = AuthService::with_data_path(&path);
        let mut service = state.lock().await;
        service.import(DOCUMENT.as_bytes()).await.unwrap();
    }

    let state = AuthService::with_data_path(&path);
    let mut service = state.lock().await;
    assert!(service.load_persisted().await.unwrap());
    let set = service.current().await.unwrap();
    assert_eq!(set.services.len(), 3);
    assert_eq!(set.services[0].name, "Example");
    let label = set.services[0].icon.as_ref().unwrap().label.as_ref().unwrap();
    assert_eq!(label.background_color.as_deref(), Some("#336699"));

    // The copy action recomputes from the recovered set.
    let token = service.token_for(0).await.unwrap();
    assert_eq!(token.len(), 6);
}

#[tokio::test]
async fn live_refresh_loop_emits() {
    let dir = tempfile::tempdir().unwrap();
    let state = AuthService::with_data_path(dir.path().join(storage::DATA_FILE));
    let mut service = state.lock().await;
    service.import(DOCUMENT.as_bytes()).await.unwrap();

    let mut rx = service.start_refresh().expect("first start");
    drop(service);

    // The first interval tick fires immediately; wait for the initial
    // burst of per-service events.
    let mut seen = Vec::new();
    while seen.len() < 3 {
        seen.push(rx.recv().await.expect("refresh loop is running"));
    }
    assert_eq!(seen[0].index, 0);
    assert_eq!(seen[1].index, 1);
    assert_eq!(seen[2].index, 2);
    assert!(seen[0].formatted_token.is_some());
}
