//! # Week Handlers
//!
//! Direct access to stored weeks: computing a week key for a date, loading a
//! week and replacing a week wholesale.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use planner_core::{
    errors::PlannerError,
    models::{
        api::{SaveWeekRequest, SaveWeekResponse, WeekKeyQuery, WeekKeyResponse, WeekScheduleResponse},
        Schedule, Slot, SlotRecord, WeekKey, WeekView,
    },
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Week key and headers for the week containing `date`
///
/// # Endpoint
///
/// ```text
/// GET /api/week-key?date=2025-11-09
/// ```
#[axum::debug_handler]
pub async fn week_key(Query(query): Query<WeekKeyQuery>) -> Result<Json<WeekKeyResponse>, AppError> {
    let week = WeekView::for_week_start(query.date)?;
    Ok(Json(WeekKeyResponse {
        week_key: week.week_key,
        week,
    }))
}

/// Loads a stored week; an unknown week is empty
#[axum::debug_handler]
pub async fn get_week(
    State(state): State<Arc<ApiState>>,
    Path(raw_key): Path<String>,
) -> Result<Json<WeekScheduleResponse>, AppError> {
    let week_key: WeekKey = raw_key.parse()?;
    let schedule = state.schedules.load(&week_key).await;

    Ok(Json(WeekScheduleResponse {
        week_key,
        slots: schedule.slots().iter().map(SlotRecord::from).collect(),
    }))
}

/// Replaces a stored week with the given slots
///
/// Blank cells are dropped; any other malformed slot, or one outside the
/// displayed hours, rejects the whole request. When the week is the one on
/// screen, the session adopts the new schedule as well.
#[axum::debug_handler]
pub async fn save_week(
    State(state): State<Arc<ApiState>>,
    Path(raw_key): Path<String>,
    Json(payload): Json<SaveWeekRequest>,
) -> Result<Json<SaveWeekResponse>, AppError> {
    let week_key: WeekKey = raw_key.parse()?;

    let mut slots = Vec::with_capacity(payload.slots.len());
    for record in payload.slots {
        if record.conteudo.trim().is_empty() {
            continue;
        }
        let slot = Slot::try_from(record)?;
        state.grid.check_hour(slot.hour)?;
        slots.push(slot);
    }
    let schedule = Schedule::from_slots(slots);

    let mut session = state.session.lock().await;
    state
        .schedules
        .save(&week_key, &schedule)
        .await
        .map_err(PlannerError::Storage)?;

    let saved_slots = schedule.len();
    if session.week_key() == week_key {
        let week_start = session.week_start();
        session.enter_week(week_start, schedule)?;
    }

    Ok(Json(SaveWeekResponse {
        week_key,
        saved_slots,
        saved_at: Utc::now(),
    }))
}
