use async_trait::async_trait;
use eyre::{Result, WrapErr};
use planner_core::models::{GridConfig, Schedule, Slot, SlotRecord, WeekKey};
use serde_json::{Map, Value};

use super::{decode_list, json_kind, read_json, ScheduleRepository, FLAT_SCHEDULE_KEY, WEEKLY_SCHEDULES_KEY};
use crate::store::KeyValueStore;

/// One schedule per week under [`WEEKLY_SCHEDULES_KEY`].
pub struct WeeklyScheduleRepository<S> {
    store: S,
    grid: GridConfig,
}

impl<S: KeyValueStore> WeeklyScheduleRepository<S> {
    pub fn new(store: S, grid: GridConfig) -> Self {
        Self { store, grid }
    }

    /// The stored week map. A corrupt document yields an empty map; a
    /// storage failure is returned so a save does not clobber other weeks.
    async fn read_weeks(&self) -> Result<Map<String, Value>> {
        let raw = self
            .store
            .get(WEEKLY_SCHEDULES_KEY)
            .await
            .wrap_err("Failed to read stored weeks")?;

        let Some(raw) = raw else {
            return Ok(Map::new());
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(weeks)) => Ok(weeks),
            Ok(other) => {
                tracing::warn!(
                    "Replacing {} under {}: expected an object of weeks",
                    json_kind(&other),
                    WEEKLY_SCHEDULES_KEY
                );
                Ok(Map::new())
            }
            Err(e) => {
                tracing::warn!("Replacing corrupt {}: {}", WEEKLY_SCHEDULES_KEY, e);
                Ok(Map::new())
            }
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> ScheduleRepository for WeeklyScheduleRepository<S> {
    async fn load(&self, week: &WeekKey) -> Schedule {
        let key = week.to_string();
        let weeks = read_json(&self.store, WEEKLY_SCHEDULES_KEY).await;
        let entry = match &weeks {
            Some(Value::Object(weeks)) => weeks.get(&key),
            Some(other) => {
                tracing::warn!(
                    "Expected an object of weeks under {}, found {}",
                    WEEKLY_SCHEDULES_KEY,
                    json_kind(other)
                );
                None
            }
            None => None,
        };

        let schedule = schedule_from_records(decode_list(entry, &key));
        tracing::debug!("Loaded week {}: {} slots", key, schedule.len());
        schedule
    }

    async fn save(&self, week: &WeekKey, schedule: &Schedule) -> Result<()> {
        let key = week.to_string();
        let records = schedule.to_records(&self.grid);
        tracing::debug!("Saving week {}: {} slots", key, records.len());

        let mut weeks = self.read_weeks().await?;
        weeks.insert(key, serde_json::to_value(records)?);

        self.store
            .set(WEEKLY_SCHEDULES_KEY, &Value::Object(weeks).to_string())
            .await
            .wrap_err("Failed to write stored weeks")
    }
}

/// A single schedule under [`FLAT_SCHEDULE_KEY`], shared by every week.
pub struct FlatScheduleRepository<S> {
    store: S,
    grid: GridConfig,
}

impl<S: KeyValueStore> FlatScheduleRepository<S> {
    pub fn new(store: S, grid: GridConfig) -> Self {
        Self { store, grid }
    }
}

#[async_trait]
impl<S: KeyValueStore> ScheduleRepository for FlatScheduleRepository<S> {
    async fn load(&self, _week: &WeekKey) -> Schedule {
        let stored = read_json(&self.store, FLAT_SCHEDULE_KEY).await;
        let schedule = schedule_from_records(decode_list(stored.as_ref(), FLAT_SCHEDULE_KEY));
        tracing::debug!("Loaded flat schedule: {} slots", schedule.len());
        schedule
    }

    async fn save(&self, _week: &WeekKey, schedule: &Schedule) -> Result<()> {
        let records = schedule.to_records(&self.grid);
        tracing::debug!("Saving flat schedule: {} slots", records.len());

        self.store
            .set(FLAT_SCHEDULE_KEY, &serde_json::to_string(&records)?)
            .await
            .wrap_err("Failed to write flat schedule")
    }
}

fn schedule_from_records(records: Vec<SlotRecord>) -> Schedule {
    Schedule::from_slots(records.into_iter().filter_map(|record| {
        let label = format!("{} {}", record.dia, record.hora);
        match Slot::try_from(record) {
            Ok(slot) => Some(slot),
            Err(e) => {
                tracing::warn!("Skipping stored slot {}: {}", label, e);
                None
            }
        }
    }))
}
