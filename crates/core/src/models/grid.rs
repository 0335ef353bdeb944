use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::errors::{PlannerError, PlannerResult};
use crate::models::day::Day;

/// The displayable hour rows of the planner, `first_hour..end_hour`.
///
/// The default covers the rows 8:00 through 19:00. Deserialization goes
/// through [`GridConfig::new`], so a stored range is checked the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridBounds")]
pub struct GridConfig {
    first_hour: u8,
    end_hour: u8,
}

#[derive(Deserialize)]
struct GridBounds {
    first_hour: u8,
    end_hour: u8,
}

impl TryFrom<GridBounds> for GridConfig {
    type Error = PlannerError;

    fn try_from(bounds: GridBounds) -> PlannerResult<Self> {
        Self::new(bounds.first_hour, bounds.end_hour)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            first_hour: 8,
            end_hour: 20,
        }
    }
}

impl GridConfig {
    pub fn new(first_hour: u8, end_hour: u8) -> PlannerResult<Self> {
        if first_hour >= end_hour || end_hour > 24 {
            return Err(PlannerError::Validation(format!(
                "Invalid hour range {}..{}: expected first < end <= 24",
                first_hour, end_hour
            )));
        }
        Ok(Self {
            first_hour,
            end_hour,
        })
    }

    pub fn first_hour(&self) -> u8 {
        self.first_hour
    }

    /// First hour past the last displayed row.
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    pub fn hours(&self) -> impl Iterator<Item = u8> {
        self.first_hour..self.end_hour
    }

    pub fn contains(&self, hour: u32) -> bool {
        (u32::from(self.first_hour)..u32::from(self.end_hour)).contains(&hour)
    }

    pub fn check_hour(&self, hour: u8) -> PlannerResult<()> {
        if self.contains(u32::from(hour)) {
            Ok(())
        } else {
            Err(PlannerError::Validation(format!(
                "Hour {} is outside the planner grid ({}:00 to {}:00)",
                hour,
                self.first_hour,
                self.end_hour - 1
            )))
        }
    }
}

/// Row label for an hour, e.g. `"9:00"`.
pub fn hour_label(hour: u8) -> String {
    format!("{}:00", hour)
}

/// Inverse of [`hour_label`]. Only whole hours are accepted.
pub fn parse_hour_label(label: &str) -> Option<u8> {
    let (hour, minutes) = label.trim().split_once(':')?;
    if minutes != "00" {
        return None;
    }
    hour.parse::<u8>().ok().filter(|hour| *hour < 24)
}

/// Restricts the grid to one day column and/or one hour row.
///
/// Query-string friendly: `?dia=Segunda&hora=9`, with empty values meaning
/// "no restriction".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFilter {
    #[serde(rename = "dia", default, deserialize_with = "empty_as_none")]
    pub day: Option<Day>,
    #[serde(rename = "hora", default, deserialize_with = "empty_as_none")]
    pub hour: Option<u8>,
}

impl GridFilter {
    pub fn shows_day(&self, day: Day) -> bool {
        self.day.is_none_or(|selected| selected == day)
    }

    pub fn shows_hour(&self, hour: u8) -> bool {
        self.hour.is_none_or(|selected| selected == hour)
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub day: Day,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub hour: u8,
    pub label: String,
    pub cells: Vec<GridCell>,
}
