//! # Planner API
//!
//! The API crate serves the weekly appointment planner over HTTP.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Load, edit and save schedules through the repositories
//! - **Middleware**: Error mapping
//! - **Config**: Environment-driven settings
//!
//! The server keeps one [`SessionState`] (the week on screen and its
//! in-memory schedule). It is saved when navigating away from a week, on
//! explicit save, after multi-hour fills and, best effort, on shutdown.

/// Configuration module for server settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping for handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use chrono::{Local, NaiveDate};
use eyre::Result;
use planner_core::models::{GridConfig, SessionState};
use planner_db::{
    create_pool,
    repositories::{
        FlatScheduleRepository, ReferenceRepository, ScheduleRepository, StoredReferenceRepository,
        WeeklyScheduleRepository,
    },
    schema::initialize_database,
    store::{JsonFileStore, KeyValueStore, MemoryStore, PgStore},
};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{info, warn};

use crate::config::{PlannerConfig, ScheduleLayout, StorageBackend};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Schedule storage, weekly or flat
    pub schedules: Arc<dyn ScheduleRepository>,
    /// Registered procedures and clients
    pub reference: Arc<dyn ReferenceRepository>,
    /// Displayed hour rows
    pub grid: GridConfig,
    /// The week on screen
    pub session: Mutex<SessionState>,
}

impl ApiState {
    /// Opens a session on the week containing `today`, loading its schedule.
    pub async fn open(
        schedules: Arc<dyn ScheduleRepository>,
        reference: Arc<dyn ReferenceRepository>,
        grid: GridConfig,
        today: NaiveDate,
    ) -> Result<Self> {
        let mut session = SessionState::starting_at(today, Default::default())?;
        let schedule = schedules.load(&session.week_key()).await;
        session.enter_week(today, schedule)?;
        info!("Opening planner on week {}", session.week_key());

        Ok(Self {
            schedules,
            reference,
            grid,
            session: Mutex::new(session),
        })
    }

    /// Builds storage and repositories as configured and opens the current week.
    pub async fn from_config(config: &PlannerConfig) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.storage {
            StorageBackend::File(path) => {
                info!("Using file storage at {}", path.display());
                Arc::new(JsonFileStore::new(path.clone()))
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage; the planner will not survive a restart");
                Arc::new(MemoryStore::new())
            }
            StorageBackend::Postgres(database_url) => {
                info!("Using PostgreSQL storage");
                let pool = create_pool(database_url).await?;
                initialize_database(&pool).await?;
                Arc::new(PgStore::new(pool))
            }
        };

        let schedules: Arc<dyn ScheduleRepository> = match config.layout {
            ScheduleLayout::Weekly => Arc::new(WeeklyScheduleRepository::new(store.clone(), config.grid)),
            ScheduleLayout::Flat => Arc::new(FlatScheduleRepository::new(store.clone(), config.grid)),
        };
        let reference = Arc::new(StoredReferenceRepository::new(store));

        Self::open(schedules, reference, config.grid, Local::now().date_naive()).await
    }

    /// Persists the session's current week.
    pub async fn save_session(&self) -> Result<()> {
        let session = self.session.lock().await;
        self.schedules
            .save(&session.week_key(), session.schedule())
            .await
    }
}

/// Builds the application router with all routes
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Week load/save and week keys
        .merge(routes::weeks::routes())
        // Current session: navigation, assignment, fills
        .merge(routes::session::routes())
        // Procedure and client pickers
        .merge(routes::reference::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the planner server
///
/// Serves until Ctrl-C or SIGTERM, then makes one bounded attempt to save
/// the session's current week.
pub async fn start_server(config: PlannerConfig, state: ApiState) -> Result<()> {
    let state = Arc::new(state);
    let app = app(state.clone());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<axum::http::HeaderValue>>(),
            );

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(|_: tower::BoxError| async {
                axum::http::StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, saving current week");
    match tokio::time::timeout(
        Duration::from_secs(config.shutdown_save_timeout),
        state.save_session(),
    )
    .await
    {
        Ok(Ok(())) => info!("Current week saved"),
        Ok(Err(e)) => warn!("Could not save current week on exit: {:#}", e),
        Err(_) => warn!("Timed out saving current week on exit"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
