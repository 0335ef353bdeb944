use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/week-key", get(handlers::weeks::week_key))
        .route(
            "/api/weeks/:week_key",
            get(handlers::weeks::get_week).put(handlers::weeks::save_week),
        )
}
