//! Poll loop behaviour against scripted telemetry sources

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use batterydash_core::dashboard::Dashboard;
use batterydash_core::error::FetchError;
use batterydash_core::poll::spawn_poller;
use batterydash_core::source::TelemetrySource;
use batterydash_core::surface::MemorySurface;
use batterydash_core::telemetry::Snapshot;
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

/// Replays a fixed script of results, one per fetch
struct Scripted {
    script: Mutex<VecDeque<Result<Snapshot, FetchError>>>,
}

impl Scripted {
    fn new(script: Vec<Result<Snapshot, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

impl TelemetrySource for Scripted {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Unavailable("script exhausted".to_string())))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// First fetch hangs for a long time, later ones answer immediately
struct SlowFirst {
    calls: Arc<Mutex<u32>>,
}

impl TelemetrySource for SlowFirst {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if n == 1 {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        Ok(Snapshot {
            load: Some(n as f64),
            ..Snapshot::default()
        })
    }

    fn describe(&self) -> String {
        "slow-first".to_string()
    }
}

fn snapshot(dod: f64) -> Snapshot {
    Snapshot {
        dod: Some(dod),
        voltage: Some(48.0),
        current: Some(100.0),
        power_consumption: Some(5.0),
        ..Snapshot::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_failure_does_not_stop_polling() {
    let source = Scripted::new(vec![
        Ok(snapshot(30.0)),
        Err(FetchError::Status(503)),
        Ok(snapshot(45.0)),
    ]);
    let cancel = CancellationToken::new();
    let mut rx = spawn_poller(source, Duration::from_millis(2000), cancel.clone());
    let mut dash = Dashboard::bootstrap(MemorySurface::new());
    let now = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    let first = rx.recv().await.unwrap();
    dash.handle(first, now);
    assert_eq!(dash.surface().text("soc"), Some("70%"));

    let second = rx.recv().await.unwrap();
    assert!(second.result.is_err());
    dash.handle(second, now);
    assert_eq!(dash.surface().text("soc"), Some("70%"));
    assert_eq!(dash.failed_count(), 1);

    let third = rx.recv().await.unwrap();
    assert_eq!(third.tick, 3);
    dash.handle(third, now);
    assert_eq!(dash.surface().text("soc"), Some("55%"));

    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_hung_fetch_does_not_block_timer() {
    let calls = Arc::new(Mutex::new(0));
    let cancel = CancellationToken::new();
    let mut rx = spawn_poller(
        SlowFirst {
            calls: calls.clone(),
        },
        Duration::from_millis(2000),
        cancel.clone(),
    );

    // Ticks 2 and 3 complete at t=2s and t=4s, before tick 1 at t=5s
    let order: Vec<u64> = vec![
        rx.recv().await.unwrap().tick,
        rx.recv().await.unwrap().tick,
        rx.recv().await.unwrap().tick,
    ];
    assert_eq!(order, vec![2, 3, 1]);

    cancel.cancel();
}
