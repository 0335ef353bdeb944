use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/reference/procedures", get(handlers::reference::list_procedures))
        .route("/api/reference/clients", get(handlers::reference::list_clients))
}
