use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/session", get(handlers::session::get_session))
        .route("/api/session/previous", post(handlers::session::previous_week))
        .route("/api/session/next", post(handlers::session::next_week))
        .route("/api/session/today", post(handlers::session::current_week))
        .route("/api/session/slots", post(handlers::session::assign_slot))
        .route("/api/session/runs", post(handlers::session::fill_run))
        .route("/api/session/save", post(handlers::session::save_session))
        .route("/api/session/grid", get(handlers::session::grid))
}
