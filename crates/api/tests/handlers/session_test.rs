use axum::http::StatusCode;
use chrono::Local;
use planner_core::models::{
    api::{AssignSlotResponse, FillRunResponse, GridResponse, SaveWeekResponse, SessionResponse},
    Day, Schedule, SlotRecord, WeekKey,
};
use planner_db::{
    mock::repositories::{MockReferenceRepo, MockScheduleRepo},
    repositories::WEEKLY_SCHEDULES_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{server_with_mocks, TestContext};

fn record(dia: &str, hora: &str, conteudo: &str) -> SlotRecord {
    SlotRecord {
        dia: dia.to_string(),
        hora: hora.to_string(),
        conteudo: conteudo.to_string(),
    }
}

async fn assign(ctx: &TestContext, day: &str, hour: u8, content: &str) -> AssignSlotResponse {
    ctx.server
        .post("/api/session/slots")
        .json(&json!({ "day": day, "hour": hour, "content": content }))
        .await
        .json::<AssignSlotResponse>()
}

#[tokio::test]
async fn test_session_opens_on_current_week() {
    let ctx = TestContext::new().await;

    let session = ctx.server.get("/api/session").await.json::<SessionResponse>();

    assert_eq!(session.week.week_key.to_string(), "2025-11-10");
    assert_eq!(session.week.title, "Semana de 09/11 a 15/11");
    assert_eq!(session.week.days.len(), 7);
    assert_eq!(session.week.days[1].label, "Segunda (10/11)");
    assert!(session.slots.is_empty());
}

#[tokio::test]
async fn test_assignment_stays_in_memory_until_saved() {
    let ctx = TestContext::new().await;

    let assigned = assign(&ctx, "Segunda", 9, "Maria - Corte").await;
    assert_eq!(assigned.content.as_deref(), Some("Maria - Corte"));
    assert_eq!(assigned.replaced, None);
    assert_eq!(ctx.stored(WEEKLY_SCHEDULES_KEY).await, None);

    let saved = ctx.server.post("/api/session/save").await.json::<SaveWeekResponse>();
    assert_eq!(saved.saved_slots, 1);
    assert_eq!(
        ctx.stored(WEEKLY_SCHEDULES_KEY).await,
        Some(json!({
            "2025-11-10": [{ "dia": "Segunda", "hora": "9:00", "conteudo": "Maria - Corte" }]
        }))
    );
}

#[tokio::test]
async fn test_navigation_saves_outgoing_week_and_loads_incoming() {
    let ctx = TestContext::new().await;
    assign(&ctx, "Segunda", 9, "Maria - Corte").await;

    let next = ctx.server.post("/api/session/next").await.json::<SessionResponse>();
    assert_eq!(next.week.week_key.to_string(), "2025-11-17");
    assert!(next.slots.is_empty());
    assert!(ctx.stored(WEEKLY_SCHEDULES_KEY).await.unwrap()["2025-11-10"].is_array());

    let back = ctx.server.post("/api/session/previous").await.json::<SessionResponse>();
    assert_eq!(back.week.week_key.to_string(), "2025-11-10");
    assert_eq!(back.slots, vec![record("Segunda", "9:00", "Maria - Corte")]);
}

#[tokio::test]
async fn test_today_returns_to_current_week() {
    let ctx = TestContext::new().await;
    ctx.server.post("/api/session/previous").await;

    let session = ctx.server.post("/api/session/today").await.json::<SessionResponse>();

    assert_eq!(session.week.week_key, WeekKey::for_date(Local::now().date_naive()).unwrap());
}

#[tokio::test]
async fn test_assigning_replaces_and_blank_clears() {
    let ctx = TestContext::new().await;
    assign(&ctx, "Terça", 10, "Maria - Corte").await;

    let replaced = assign(&ctx, "Terça", 10, "Joana - Escova").await;
    assert_eq!(replaced.content.as_deref(), Some("Joana - Escova"));
    assert_eq!(replaced.replaced.as_deref(), Some("Maria - Corte"));

    let cleared = assign(&ctx, "Terça", 10, "   ").await;
    assert_eq!(cleared.content, None);
    assert_eq!(cleared.replaced.as_deref(), Some("Joana - Escova"));

    let session = ctx.server.get("/api/session").await.json::<SessionResponse>();
    assert!(session.slots.is_empty());
}

#[tokio::test]
async fn test_assignment_outside_grid_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/session/slots")
        .json(&json!({ "day": "Segunda", "hour": 20, "content": "Maria - Corte" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assignment_needs_content_or_procedure() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/session/slots")
        .json(&json!({ "day": "Segunda", "hour": 9 }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assignment_from_procedure_pick() {
    let ctx = TestContext::with_reference_data().await;

    let with_client = ctx
        .server
        .post("/api/session/slots")
        .json(&json!({ "day": "Quarta", "hour": 11, "procedure": 1, "client": 1 }))
        .await
        .json::<AssignSlotResponse>();
    assert_eq!(with_client.content.as_deref(), Some("Joana - Corte"));

    let without_client = ctx
        .server
        .post("/api/session/slots")
        .json(&json!({ "day": "Quarta", "hour": 12, "procedure": 1 }))
        .await
        .json::<AssignSlotResponse>();
    assert_eq!(without_client.content.as_deref(), Some("Maria - Corte"));
}

#[tokio::test]
async fn test_fill_run_writes_and_saves_consecutive_hours() {
    let ctx = TestContext::with_reference_data().await;

    let response = ctx
        .server
        .post("/api/session/runs")
        .json(&json!({ "day": "Sexta", "hour": 14, "procedure": 2, "client": 2 }))
        .await;

    response.assert_status_ok();
    let filled = response.json::<FillRunResponse>();
    assert_eq!(filled.content, "Beatriz - Coloração");
    assert_eq!(filled.run.day, Day::Friday);
    assert_eq!(filled.run.hours_written, 3);

    let stored = ctx.stored(WEEKLY_SCHEDULES_KEY).await.unwrap();
    assert_eq!(
        stored["2025-11-10"],
        json!([
            { "dia": "Sexta", "hora": "14:00", "conteudo": "Beatriz - Coloração" },
            { "dia": "Sexta", "hora": "15:00", "conteudo": "Beatriz - Coloração" },
            { "dia": "Sexta", "hora": "16:00", "conteudo": "Beatriz - Coloração" },
        ])
    );
}

#[tokio::test]
async fn test_fill_run_without_room_keeps_partial_run() {
    let ctx = TestContext::with_reference_data().await;

    let response = ctx
        .server
        .post("/api/session/runs")
        .json(&json!({ "day": "Sábado", "hour": 18, "procedure": 2 }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Insufficient remaining slots: no room to complete 3h, missing hour 20:00")
    );

    let stored = ctx.stored(WEEKLY_SCHEDULES_KEY).await.unwrap();
    assert_eq!(
        stored["2025-11-10"],
        json!([
            { "dia": "Sábado", "hora": "18:00", "conteudo": "Ana - Coloração" },
            { "dia": "Sábado", "hora": "19:00", "conteudo": "Ana - Coloração" },
        ])
    );
}

#[tokio::test]
async fn test_fill_run_without_procedures_is_unprocessable() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/session/runs")
        .json(&json!({ "day": "Segunda", "hour": 9, "procedure": 1 }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.stored(WEEKLY_SCHEDULES_KEY).await, None);
}

#[tokio::test]
async fn test_fill_run_with_unknown_choice_is_rejected() {
    let ctx = TestContext::with_reference_data().await;

    let response = ctx
        .server
        .post("/api/session/runs")
        .json(&json!({ "day": "Segunda", "hour": 9, "procedure": 3 }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grid_filters_by_day_and_hour() {
    let ctx = TestContext::new().await;
    assign(&ctx, "Segunda", 9, "Maria - Corte").await;
    assign(&ctx, "Terça", 9, "Joana - Escova").await;
    assign(&ctx, "Segunda", 10, "Ana - Coloração").await;

    let one_cell = ctx
        .server
        .get("/api/session/grid")
        .add_query_param("dia", "Segunda")
        .add_query_param("hora", 9)
        .await
        .json::<GridResponse>();
    assert_eq!(one_cell.rows.len(), 1);
    assert_eq!(one_cell.rows[0].label, "9:00");
    assert_eq!(one_cell.rows[0].cells.len(), 1);
    assert_eq!(one_cell.rows[0].cells[0].content.as_deref(), Some("Maria - Corte"));

    let whole_row = ctx
        .server
        .get("/api/session/grid?dia=&hora=9")
        .await
        .json::<GridResponse>();
    assert_eq!(whole_row.rows.len(), 1);
    assert_eq!(whole_row.rows[0].cells.len(), 7);

    let everything = ctx.server.get("/api/session/grid").await.json::<GridResponse>();
    assert_eq!(everything.rows.len(), 12);
}

#[tokio::test]
async fn test_failed_save_keeps_session_on_its_week() {
    let mut schedules = MockScheduleRepo::new();
    schedules.expect_load().returning(|_| Schedule::new());
    schedules
        .expect_save()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("disk full")));
    let server = server_with_mocks(schedules, MockReferenceRepo::new()).await;

    let response = server.post("/api/session/next").expect_failure().await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let session = server.get("/api/session").await.json::<SessionResponse>();
    assert_eq!(session.week.week_key.to_string(), "2025-11-10");
}

#[tokio::test]
async fn test_fill_run_reads_reference_data_once() {
    let mut schedules = MockScheduleRepo::new();
    schedules.expect_load().returning(|_| Schedule::new());
    schedules.expect_save().times(1).returning(|_, _| Ok(()));
    let mut reference = MockReferenceRepo::new();
    reference.expect_reference_data().times(1).returning(|| {
        serde_json::from_value(json!({
            "procedures": [{ "nome": "Maria", "procedimento": "Corte", "duracao": "2h" }],
            "clients": []
        }))
        .unwrap()
    });
    let server = server_with_mocks(schedules, reference).await;

    let filled = server
        .post("/api/session/runs")
        .json(&json!({ "day": "Domingo", "hour": 8, "procedure": 1 }))
        .await
        .json::<FillRunResponse>();

    assert_eq!(filled.content, "Maria - Corte");
    assert_eq!(filled.run.hours_written, 2);
}
