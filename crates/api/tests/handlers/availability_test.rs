use std::sync::Arc;

use axum::http::StatusCode;
use clinicsync_api::{
    handlers::availability::SYNC_SUCCESS_MESSAGE,
    middleware::error_handling::SYNC_FAILURE_MESSAGE,
};
use clinicsync_core::{
    feed::{FeedSource, StaticFeedSource},
    models::availability::{AvailabilitySlot, PersistedAvailabilityDay},
    store::AvailabilityStore,
};
use clinicsync_db::{MemoryAvailabilityStore, mock::MockAvailabilityStore};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, build_server};

fn two_doctor_feed() -> Value {
    json!({
        "schedules": [
            {
                "idDoctor": "doc1",
                "idClinic": "clinic1",
                "slotdates": [
                    {
                        "date": "2024-01-01",
                        "slots": [
                            { "dateTime": "2024-01-01T10:00:00Z" },
                            { "dateTime": "2024-01-01T11:00:00Z" }
                        ]
                    },
                    { "date": "2024-01-02", "slots": [{ "dateTime": "2024-01-02T12:00:00Z" }] }
                ]
            },
            {
                "idDoctor": "doc2",
                "idClinic": "clinic2",
                "slotdates": [
                    { "date": "2024-01-01", "slots": [{ "dateTime": "2024-01-01T14:00:00Z" }] },
                    { "date": "2024-01-03" }
                ]
            }
        ]
    })
}

fn stale_day() -> PersistedAvailabilityDay {
    PersistedAvailabilityDay {
        date: "2023-12-31".to_string(),
        availability: vec![AvailabilitySlot::new("doc9", "clinic9", "08:00:00")],
    }
}

#[tokio::test]
async fn test_sync_returns_201_with_unified_availability() {
    let ctx = TestContext::new(two_doctor_feed());

    let response = ctx.server.get("/doctors/availability").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "message": SYNC_SUCCESS_MESSAGE,
            "availability": {
                "2024-01-01": [
                    { "doctorId": "doc1", "clinicId": "clinic1", "time": "10:00:00" },
                    { "doctorId": "doc1", "clinicId": "clinic1", "time": "11:00:00" },
                    { "doctorId": "doc2", "clinicId": "clinic2", "time": "14:00:00" }
                ],
                "2024-01-02": [
                    { "doctorId": "doc1", "clinicId": "clinic1", "time": "12:00:00" }
                ],
                "2024-01-03": []
            }
        })
    );
}

#[tokio::test]
async fn test_sync_replaces_stored_days() {
    let ctx = TestContext::with_store(
        two_doctor_feed(),
        MemoryAvailabilityStore::with_days([stale_day()]),
    );

    let response = ctx.server.post("/doctors/availability").await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let dates: Vec<String> = ctx
        .store
        .list_days()
        .await
        .unwrap()
        .into_iter()
        .map(|day| day.date)
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
}

#[tokio::test]
async fn test_malformed_feed_returns_500_and_keeps_store() {
    let ctx = TestContext::with_store(json!({}), MemoryAvailabilityStore::with_days([stale_day()]));

    let response = ctx.server.get("/doctors/availability").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": SYNC_FAILURE_MESSAGE })
    );
    assert_eq!(ctx.store.list_days().await.unwrap(), vec![stale_day()]);
}

struct UnreachableFeed;

#[async_trait::async_trait]
impl FeedSource for UnreachableFeed {
    async fn read(&self) -> eyre::Result<Vec<u8>> {
        eyre::bail!("connection refused")
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}

#[tokio::test]
async fn test_unreadable_feed_returns_500() {
    let server = build_server(Arc::new(MemoryAvailabilityStore::new()), UnreachableFeed);

    let response = server.get("/doctors/availability").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": SYNC_FAILURE_MESSAGE })
    );
}

#[tokio::test]
async fn test_store_failure_returns_500() {
    let mut store = MockAvailabilityStore::new();
    store
        .expect_delete_all()
        .times(1)
        .returning(|| Err(eyre::eyre!("connection lost")));
    store.expect_insert().never();

    let server = build_server(
        Arc::new(store),
        StaticFeedSource::new(two_doctor_feed().to_string()),
    );

    let response = server.get("/doctors/availability").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": SYNC_FAILURE_MESSAGE })
    );
}

#[tokio::test]
async fn test_failed_insert_stops_later_inserts() {
    let mut store = MockAvailabilityStore::new();
    store.expect_delete_all().times(1).returning(|| Ok(()));
    store
        .expect_insert()
        .withf(|day: &PersistedAvailabilityDay| day.date == "2024-01-01")
        .times(1)
        .returning(|_| Err(eyre::eyre!("disk full")));

    let server = build_server(
        Arc::new(store),
        StaticFeedSource::new(two_doctor_feed().to_string()),
    );

    let response = server.get("/doctors/availability").await;

    // Any insert for a later date would hit no matching expectation and panic the handler
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_list_days_after_sync() {
    let ctx = TestContext::new(two_doctor_feed());
    ctx.server.get("/doctors/availability").await;

    let response = ctx.server.get("/doctors/availability/days").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let days = response.json::<Vec<PersistedAvailabilityDay>>();
    assert_eq!(
        days.iter().map(|d| d.date.as_str()).collect::<Vec<_>>(),
        vec!["2024-01-01", "2024-01-02", "2024-01-03"]
    );
    assert_eq!(days[0].availability.len(), 3);
    assert!(days[2].availability.is_empty());
}

#[tokio::test]
async fn test_get_day() {
    let ctx = TestContext::new(two_doctor_feed());
    ctx.server.get("/doctors/availability").await;

    let response = ctx.server.get("/doctors/availability/days/2024-01-02").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<PersistedAvailabilityDay>(),
        PersistedAvailabilityDay {
            date: "2024-01-02".to_string(),
            availability: vec![AvailabilitySlot::new("doc1", "clinic1", "12:00:00")],
        }
    );
}

#[tokio::test]
async fn test_get_day_not_found() {
    let ctx = TestContext::new(two_doctor_feed());

    let response = ctx.server.get("/doctors/availability/days/2024-01-02").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_get_day_rejects_bad_date() {
    let ctx = TestContext::new(two_doctor_feed());

    let response = ctx.server.get("/doctors/availability/days/01-02-2024").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_day_store_error() {
    let mut store = MockAvailabilityStore::new();
    store
        .expect_find_day()
        .withf(|date: &str| date == "2024-01-01")
        .returning(|_| Err(eyre::eyre!("timeout")));

    let server = build_server(Arc::new(store), StaticFeedSource::new("{}"));

    let response = server.get("/doctors/availability/days/2024-01-01").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
