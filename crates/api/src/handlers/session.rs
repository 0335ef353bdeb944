//! # Session Handlers
//!
//! The week on screen: navigating between weeks, assigning cells, filling
//! multi-hour runs and saving.
//!
//! Navigation saves the outgoing week before loading the incoming one.
//! Single-cell assignments stay in memory until the next save, while a run
//! fill is saved straight away, including a partial run that did not fit.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use planner_core::{
    errors::{PlannerError, PlannerResult},
    models::{
        api::{
            AssignSlotRequest, AssignSlotResponse, FillRunRequest, FillRunResponse, GridResponse,
            SaveWeekResponse, SessionResponse,
        },
        GridConfig, GridFilter, SessionState, WeekView,
    },
};
use std::sync::Arc;
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

fn session_response(session: &SessionState, grid: &GridConfig) -> SessionResponse {
    SessionResponse {
        week: session.view(),
        slots: session.schedule().to_records(grid),
    }
}

#[axum::debug_handler]
pub async fn get_session(State(state): State<Arc<ApiState>>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(session_response(&session, &state.grid))
}

#[axum::debug_handler]
pub async fn previous_week(State(state): State<Arc<ApiState>>) -> Result<Json<SessionResponse>, AppError> {
    navigate(&state, |session| session.shifted_start(-1)).await
}

#[axum::debug_handler]
pub async fn next_week(State(state): State<Arc<ApiState>>) -> Result<Json<SessionResponse>, AppError> {
    navigate(&state, |session| session.shifted_start(1)).await
}

#[axum::debug_handler]
pub async fn current_week(State(state): State<Arc<ApiState>>) -> Result<Json<SessionResponse>, AppError> {
    navigate(&state, |_| Ok(Local::now().date_naive())).await
}

/// Saves the week on screen, then switches to the week picked by `target`.
/// A target outside the calendar or a failed save leaves the session where
/// it was.
async fn navigate(
    state: &ApiState,
    target: impl FnOnce(&SessionState) -> PlannerResult<NaiveDate>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;

    let date = target(&*session)?;
    let incoming = WeekView::for_week_start(date)?.week_key;

    let outgoing = session.week_key();
    state.schedules.save(&outgoing, session.schedule()).await?;

    let schedule = state.schedules.load(&incoming).await;
    session.enter_week(date, schedule)?;
    info!("Moved from week {} to week {}", outgoing, incoming);

    Ok(Json(session_response(&session, &state.grid)))
}

/// Assigns or clears one cell of the week on screen
///
/// With `procedure`, the cell text comes from the procedure pick (and the
/// optional client pick); otherwise `content` is written as is, blank
/// content clearing the cell.
#[axum::debug_handler]
pub async fn assign_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AssignSlotRequest>,
) -> Result<Json<AssignSlotResponse>, AppError> {
    let content = match (payload.procedure, payload.content) {
        (Some(procedure), _) => {
            let reference = state.reference.reference_data().await;
            reference.appointment(procedure, payload.client)?.content
        }
        (None, Some(content)) => content,
        (None, None) => {
            return Err(AppError(PlannerError::Validation(
                "Provide either content or a procedure choice".to_string(),
            )));
        }
    };

    let mut session = state.session.lock().await;
    let replaced = session.assign(&state.grid, payload.day, payload.hour, &content)?;
    let current = session
        .schedule()
        .find_slot(payload.day, payload.hour)
        .map(|slot| slot.content.clone());

    Ok(Json(AssignSlotResponse {
        week_key: session.week_key(),
        day: payload.day,
        hour: payload.hour,
        content: current,
        replaced: replaced.map(|slot| slot.content),
    }))
}

/// Fills consecutive hours from a procedure pick and saves the week
///
/// When the run does not fit, the hours that did fit are kept and saved and
/// the response is a conflict naming the first missing hour.
#[axum::debug_handler]
pub async fn fill_run(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<FillRunRequest>,
) -> Result<Json<FillRunResponse>, AppError> {
    let reference = state.reference.reference_data().await;
    let appointment = reference.appointment(payload.procedure, payload.client)?;

    let mut session = state.session.lock().await;
    let week_key = session.week_key();
    let run = match session.schedule_mut().fill_run(
        &state.grid,
        payload.day,
        payload.hour,
        appointment.duration_hours,
        &appointment.content,
    ) {
        Ok(run) => Ok(run),
        Err(e @ PlannerError::InsufficientSlots { .. }) => Err(e),
        Err(e) => return Err(e.into()),
    };

    state.schedules.save(&week_key, session.schedule()).await?;
    let run = run?;
    info!(
        "Filled {}h of '{}' on {} from {}:00 in week {}",
        run.hours_written, appointment.content, run.day, run.start_hour, week_key
    );

    Ok(Json(FillRunResponse {
        week_key,
        content: appointment.content,
        run,
    }))
}

#[axum::debug_handler]
pub async fn save_session(State(state): State<Arc<ApiState>>) -> Result<Json<SaveWeekResponse>, AppError> {
    let session = state.session.lock().await;
    let week_key = session.week_key();
    state.schedules.save(&week_key, session.schedule()).await?;

    Ok(Json(SaveWeekResponse {
        week_key,
        saved_slots: session.schedule().to_records(&state.grid).len(),
        saved_at: Utc::now(),
    }))
}

/// Grid rows of the week on screen, restricted to `?dia=` and `?hora=`
#[axum::debug_handler]
pub async fn grid(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<GridFilter>,
) -> Json<GridResponse> {
    let session = state.session.lock().await;
    Json(GridResponse {
        week: session.view(),
        rows: session.schedule().grid_rows(&state.grid, &filter),
    })
}
