//! Schedule and reference-data repositories over a [`KeyValueStore`].
//!
//! Reads are forgiving: a missing key, a corrupt document or a malformed
//! record never fails a load. What can be read is returned and the rest is
//! logged and skipped.

pub mod reference;
pub mod schedule;

use async_trait::async_trait;
use eyre::Result;
use planner_core::models::{ReferenceData, Schedule, WeekKey};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::KeyValueStore;

pub use reference::StoredReferenceRepository;
pub use schedule::{FlatScheduleRepository, WeeklyScheduleRepository};

/// Week-keyed schedules, stored as `{ "<week key>": [slot, ...] }`.
pub const WEEKLY_SCHEDULES_KEY: &str = "plannerSemanas";
/// Single schedule shared by every week, stored as `[slot, ...]`.
pub const FLAT_SCHEDULE_KEY: &str = "plannerDados";
/// Registered procedures, `[{nome, procedimento, duracao}, ...]`.
pub const PROCEDURES_KEY: &str = "bancoProcedimentos";
/// Registered clients, `[{nome}, ...]`.
pub const CLIENTS_KEY: &str = "bancoClientes";

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// The stored schedule for `week`, or an empty one. Never fails.
    async fn load(&self, week: &WeekKey) -> Schedule;

    /// Replaces the stored schedule for `week` with the displayed cells of `schedule`.
    async fn save(&self, week: &WeekKey, schedule: &Schedule) -> Result<()>;
}

#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Registered procedures and clients; empty lists when none are stored.
    async fn reference_data(&self) -> ReferenceData;
}

/// Reads `key` as JSON, returning `None` when it is absent, unreadable or
/// not valid JSON.
async fn read_json<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<Value> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read {}: {:#}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring corrupt value under {}: {}", key, e);
            None
        }
    }
}

/// Decodes each element of a JSON array on its own, skipping the ones that
/// do not match `T`. Anything other than an array decodes to nothing.
fn decode_list<T: DeserializeOwned>(value: Option<&Value>, key: &str) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!("Expected a list under {}, found {}", key, json_kind(other));
            return Vec::new();
        }
        None => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Skipping malformed entry under {}: {}", key, e);
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
