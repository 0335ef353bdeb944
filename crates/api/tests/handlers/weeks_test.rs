use axum::http::StatusCode;
use planner_core::models::api::{
    SaveWeekResponse, SessionResponse, WeekKeyResponse, WeekScheduleResponse,
};
use planner_db::{repositories::WEEKLY_SCHEDULES_KEY, store::MemoryStore};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::TestContext;

#[rstest]
#[case("2025-11-09", "2025-11-10")]
#[case("2025-11-10", "2025-11-10")]
#[case("2025-11-15", "2025-11-10")]
#[case("2025-11-16", "2025-11-17")]
#[tokio::test]
async fn test_week_key_for_date(#[case] date: &str, #[case] expected: &str) {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get("/api/week-key")
        .add_query_param("date", date)
        .await
        .json::<WeekKeyResponse>();

    assert_eq!(response.week_key.to_string(), expected);
    assert_eq!(response.week.week_key, response.week_key);
}

#[tokio::test]
async fn test_saved_week_loads_back_and_other_weeks_stay_empty() {
    let ctx = TestContext::new().await;
    let saved = ctx
        .server
        .put("/api/weeks/2025-11-24")
        .json(&json!({
            "slots": [{ "dia": "Segunda", "hora": "9:00", "conteudo": "Maria - Corte" }]
        }))
        .await
        .json::<SaveWeekResponse>();
    assert_eq!(saved.saved_slots, 1);

    let loaded = ctx
        .server
        .get("/api/weeks/2025-11-24")
        .await
        .json::<WeekScheduleResponse>();
    assert_eq!(loaded.slots.len(), 1);
    assert_eq!(loaded.slots[0].conteudo, "Maria - Corte");

    let other = ctx
        .server
        .get("/api/weeks/2025-12-01")
        .await
        .json::<WeekScheduleResponse>();
    assert!(other.slots.is_empty());
}

#[tokio::test]
async fn test_any_date_in_week_addresses_the_same_week() {
    let ctx = TestContext::new().await;

    let saved = ctx
        .server
        .put("/api/weeks/2025-11-26")
        .json(&json!({
            "slots": [{ "dia": "Quarta", "hora": "15:00", "conteudo": "Ana - Coloração" }]
        }))
        .await
        .json::<SaveWeekResponse>();

    assert_eq!(saved.week_key.to_string(), "2025-11-24");
    let stored = ctx.stored(WEEKLY_SCHEDULES_KEY).await.unwrap();
    assert!(stored.get("2025-11-24").is_some());
    assert!(stored.get("2025-11-26").is_none());
}

#[tokio::test]
async fn test_saving_the_week_on_screen_updates_the_session() {
    let ctx = TestContext::new().await;

    ctx.server
        .put("/api/weeks/2025-11-10")
        .json(&json!({
            "slots": [
                { "dia": "Sexta", "hora": "10:00", "conteudo": "Joana - Escova" },
                { "dia": "Sexta", "hora": "11:00", "conteudo": "  " }
            ]
        }))
        .await
        .assert_status_ok();

    let session = ctx.server.get("/api/session").await.json::<SessionResponse>();
    assert_eq!(session.slots.len(), 1);
    assert_eq!(session.slots[0].hora, "10:00");
    assert_eq!(ctx.state.session.lock().await.schedule().len(), 1);
}

#[rstest]
#[case(json!({ "dia": "Segunda", "hora": "9:30", "conteudo": "Maria - Corte" }))]
#[case(json!({ "dia": "Segunda", "hora": "20:00", "conteudo": "Maria - Corte" }))]
#[case(json!({ "dia": "Feriado", "hora": "9:00", "conteudo": "Maria - Corte" }))]
#[tokio::test]
async fn test_malformed_slots_reject_the_save(#[case] slot: serde_json::Value) {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/api/weeks/2025-11-10")
        .json(&json!({ "slots": [slot] }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.stored(WEEKLY_SCHEDULES_KEY).await, None);
}

#[tokio::test]
async fn test_invalid_week_key_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/weeks/next-week").expect_failure().await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_loading_skips_malformed_stored_slots() {
    let ctx = TestContext::with_store(MemoryStore::with_entries([(
        WEEKLY_SCHEDULES_KEY,
        r#"{"2025-11-10": [
            {"dia": "Segunda", "hora": "9:00", "conteudo": "Maria - Corte"},
            {"dia": "Segunda", "hora": "nove", "conteudo": "Joana - Escova"},
            {"hora": "10:00"}
        ]}"#,
    )]))
    .await;

    let session = ctx.server.get("/api/session").await.json::<SessionResponse>();

    assert_eq!(session.slots.len(), 1);
    assert_eq!(session.slots[0].conteudo, "Maria - Corte");
}

#[tokio::test]
async fn test_dates_at_the_calendar_edge_are_rejected() {
    let ctx = TestContext::new().await;
    let last_day = chrono::NaiveDate::MAX.to_string();

    let week_key = ctx
        .server
        .get("/api/week-key")
        .add_query_param("date", &last_day)
        .expect_failure()
        .await;
    week_key.assert_status(StatusCode::BAD_REQUEST);

    let week = ctx
        .server
        .get(&format!("/api/weeks/{}", last_day))
        .expect_failure()
        .await;
    week.assert_status(StatusCode::BAD_REQUEST);

    let session = ctx.server.get("/api/session").await.json::<SessionResponse>();
    assert_eq!(session.week.week_key.to_string(), "2025-11-10");
}
