//! Numbered picker lists for registered procedures and clients.

use axum::{extract::State, Json};
use planner_core::models::api::PickerResponse;
use std::sync::Arc;

use crate::ApiState;

/// Procedures as "Nome - Procedimento (Nh)", numbered from 1
#[axum::debug_handler]
pub async fn list_procedures(State(state): State<Arc<ApiState>>) -> Json<PickerResponse> {
    let reference = state.reference.reference_data().await;
    Json(PickerResponse {
        options: reference.procedure_options(),
    })
}

#[axum::debug_handler]
pub async fn list_clients(State(state): State<Arc<ApiState>>) -> Json<PickerResponse> {
    let reference = state.reference.reference_data().await;
    Json(PickerResponse {
        options: reference.client_options(),
    })
}
