use async_trait::async_trait;
use planner_core::models::{ClientRecord, ProcedureRecord, ReferenceData};

use super::{decode_list, read_json, ReferenceRepository, CLIENTS_KEY, PROCEDURES_KEY};
use crate::store::KeyValueStore;

/// Procedures and clients as registered in the shared store. Read-only.
pub struct StoredReferenceRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StoredReferenceRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: KeyValueStore> ReferenceRepository for StoredReferenceRepository<S> {
    async fn reference_data(&self) -> ReferenceData {
        let procedures = read_json(&self.store, PROCEDURES_KEY).await;
        let clients = read_json(&self.store, CLIENTS_KEY).await;

        let data = ReferenceData {
            procedures: decode_list::<ProcedureRecord>(procedures.as_ref(), PROCEDURES_KEY),
            clients: decode_list::<ClientRecord>(clients.as_ref(), CLIENTS_KEY),
        };
        tracing::debug!(
            "Loaded reference data: {} procedures, {} clients",
            data.procedures.len(),
            data.clients.len()
        );
        data
    }
}
