use planner_core::models::{api::PickerResponse, PickerOption};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_procedures_are_numbered_from_one() {
    let ctx = TestContext::with_reference_data().await;

    let response = ctx.server.get("/api/reference/procedures").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<PickerResponse>().options,
        vec![
            PickerOption {
                number: 1,
                label: "Maria - Corte (1h)".to_string(),
            },
            PickerOption {
                number: 2,
                label: "Ana - Coloração (3h)".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_clients_are_listed_by_name() {
    let ctx = TestContext::with_reference_data().await;

    let response = ctx.server.get("/api/reference/clients").await;

    let labels: Vec<String> = response
        .json::<PickerResponse>()
        .options
        .into_iter()
        .map(|option| option.label)
        .collect();
    assert_eq!(labels, vec!["Joana", "Beatriz"]);
}

#[tokio::test]
async fn test_missing_reference_data_lists_nothing() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/reference/procedures").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "options": [] }));
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new().await;

    let health = ctx.server.get("/health").await;
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));

    let version = ctx.server.get("/version").await;
    assert_eq!(version.json::<Value>()["name"], json!("planner-api"));
}
