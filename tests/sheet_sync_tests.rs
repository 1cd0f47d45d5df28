mod harness;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use profitcast::adapter::outbound::sheets::WebhookSheetPublisher;
use profitcast::application::sync::{SheetSyncConfig, SheetSyncScheduler};
use profitcast::domain::{DateRange, ForecastReport, ForecastSummary, OrderStatus};
use profitcast::infrastructure::bootstrap::Services;
use profitcast::port::outbound::SheetPublisher;
use profitcast::testkit::domain::{ad_group, jan, order, spend};
use profitcast::testkit::RecordingPublisher;
use rust_decimal_macros::dec;
use serde_json::Value;

use harness::app::{fixed_config, TestApp};

#[tokio::test]
async fn ledger_edits_push_one_report_after_quiet_period() {
    let app = TestApp::new("sync-ledger", &fixed_config(), jan(12));
    let publisher = Arc::new(RecordingPublisher::default());
    let handle = SheetSyncScheduler::new(
        SheetSyncConfig {
            debounce: Duration::from_millis(150),
            window_days: 31,
        },
        app.services.forecast.clone(),
        publisher.clone(),
    )
    .start();
    let services = Services::new(app.services.forecast.clone(), &app.repos, Arc::new(handle));

    let ledger = services.ledger.clone();
    tokio::task::spawn_blocking(move || {
        ledger.upsert_ad_group(&ad_group("AG1")).unwrap();
        ledger
            .upsert_order(&order("o1", "AG1", jan(10), dec!(1000), dec!(300), OrderStatus::Delivered))
            .unwrap();
        ledger.upsert_spend(&spend("AG1", jan(10), dec!(250))).unwrap();
    })
    .await
    .unwrap();

    tokio::time::sleep(Duration::from_millis(800)).await;

    assert_eq!(publisher.count(), 1);
    let report = &publisher.reports()[0];
    assert_eq!(report.range, DateRange::trailing(jan(12), 31));
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.summary.blended_roas, dec!(4));
}

type Received = Arc<Mutex<Vec<Value>>>;

async fn record(State(received): State<Received>, Json(body): Json<Value>) -> StatusCode {
    received.lock().push(body);
    StatusCode::OK
}

async fn spawn_sink(status: StatusCode) -> (String, Received) {
    let received: Received = Arc::default();
    let app = if status == StatusCode::OK {
        Router::new()
            .route("/hook", post(record))
            .with_state(received.clone())
    } else {
        Router::new().route("/hook", post(move || async move { status }))
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/hook"), received)
}

fn empty_report() -> ForecastReport {
    let range = DateRange::single(jan(10));
    ForecastReport {
        range,
        ad_group_id: None,
        model_name: "fixed".into(),
        model_version: 1,
        rows: Vec::new(),
        summary: ForecastSummary::empty(range),
    }
}

#[tokio::test]
async fn webhook_posts_report_payload() {
    let (url, received) = spawn_sink(StatusCode::OK).await;
    let publisher = WebhookSheetPublisher::new(url, Duration::from_secs(5)).unwrap();

    publisher.publish(&empty_report()).await.unwrap();

    let bodies = received.lock().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["report"]["modelName"], "fixed");
    assert_eq!(bodies[0]["report"]["range"]["from"], "2024-01-10");
    assert!(bodies[0]["generatedAt"].is_string());
}

#[tokio::test]
async fn webhook_error_status_fails_publish() {
    let (url, _) = spawn_sink(StatusCode::INTERNAL_SERVER_ERROR).await;
    let publisher = WebhookSheetPublisher::new(url, Duration::from_secs(5)).unwrap();

    assert!(publisher.publish(&empty_report()).await.is_err());
}
