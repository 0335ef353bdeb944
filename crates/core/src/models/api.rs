use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    day::Day,
    grid::GridRow,
    reference::PickerOption,
    schedule::{RunReport, SlotRecord},
    week::{WeekKey, WeekView},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekKeyQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekKeyResponse {
    pub week_key: WeekKey,
    pub week: WeekView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekScheduleResponse {
    pub week_key: WeekKey,
    pub slots: Vec<SlotRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWeekRequest {
    #[serde(default)]
    pub slots: Vec<SlotRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWeekResponse {
    pub week_key: WeekKey,
    pub saved_slots: usize,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub week: WeekView,
    pub slots: Vec<SlotRecord>,
}

/// Assigns one cell, either from free text or from a procedure pick.
///
/// A blank `content` with no `procedure` clears the cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignSlotRequest {
    pub day: Day,
    pub hour: u8,
    pub content: Option<String>,
    /// 1-based procedure choice
    pub procedure: Option<usize>,
    /// 1-based client choice, only used with `procedure`
    pub client: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignSlotResponse {
    pub week_key: WeekKey,
    pub day: Day,
    pub hour: u8,
    pub content: Option<String>,
    pub replaced: Option<String>,
}

/// Fills a run of hours from a procedure pick, using its duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillRunRequest {
    pub day: Day,
    pub hour: u8,
    pub procedure: usize,
    pub client: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillRunResponse {
    pub week_key: WeekKey,
    pub content: String,
    pub run: RunReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResponse {
    pub week: WeekView,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerResponse {
    pub options: Vec<PickerOption>,
}
