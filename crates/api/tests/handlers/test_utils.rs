use std::sync::Arc;

use axum_test::TestServer;
use chrono::NaiveDate;
use planner_api::{app, ApiState};
use planner_core::models::GridConfig;
use planner_db::{
    mock::repositories::{MockReferenceRepo, MockScheduleRepo},
    repositories::{StoredReferenceRepository, WeeklyScheduleRepository, CLIENTS_KEY, PROCEDURES_KEY},
    store::{KeyValueStore, MemoryStore},
};
use serde_json::Value;

pub const PROCEDURES: &str = r#"[
    {"nome": "Maria", "procedimento": "Corte", "duracao": 1},
    {"nome": "Ana", "procedimento": "Coloração", "duracao": "3"}
]"#;

pub const CLIENTS: &str = r#"[{"nome": "Joana"}, {"nome": "Beatriz"}]"#;

/// A Wednesday; its week is keyed 2025-11-10 and starts on Sunday 2025-11-09.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 12).unwrap()
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: Arc<ApiState>,
    pub server: TestServer,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_store(MemoryStore::new()).await
    }

    /// Store seeded with two procedures and two clients
    pub async fn with_reference_data() -> Self {
        Self::with_store(MemoryStore::with_entries([
            (PROCEDURES_KEY, PROCEDURES),
            (CLIENTS_KEY, CLIENTS),
        ]))
        .await
    }

    pub async fn with_store(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let grid = GridConfig::default();
        let state = Arc::new(
            ApiState::open(
                Arc::new(WeeklyScheduleRepository::new(store.clone(), grid)),
                Arc::new(StoredReferenceRepository::new(store.clone())),
                grid,
                today(),
            )
            .await
            .unwrap(),
        );
        let server = TestServer::new(app(state.clone())).unwrap();

        Self { store, state, server }
    }

    /// Parsed JSON document stored under `key`
    pub async fn stored(&self, key: &str) -> Option<Value> {
        self.store
            .get(key)
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }
}

pub async fn server_with_mocks(schedules: MockScheduleRepo, reference: MockReferenceRepo) -> TestServer {
    let state = ApiState::open(
        Arc::new(schedules),
        Arc::new(reference),
        GridConfig::default(),
        today(),
    )
    .await
    .unwrap();

    TestServer::new(app(Arc::new(state))).unwrap()
}
