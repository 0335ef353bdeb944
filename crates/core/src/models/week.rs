use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{PlannerError, PlannerResult};
use crate::models::day::Day;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Identifies a calendar week by the ISO date of its Monday.
///
/// The grid displays weeks starting on Sunday, but keys them by the Monday
/// that follows, so a Sunday rolls forward one day rather than back six.
/// Every day of a Sunday-to-Saturday week therefore maps to the same key.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use planner_core::models::WeekKey;
///
/// let sunday = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
/// assert_eq!(WeekKey::for_date(sunday)?, WeekKey::for_date(monday)?);
/// assert_eq!(WeekKey::for_date(sunday)?.to_string(), "2025-11-10");
/// # Ok::<(), planner_core::errors::PlannerError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// Fails only for dates whose Monday lies outside the calendar range.
    pub fn for_date(date: NaiveDate) -> PlannerResult<Self> {
        let monday = match date.weekday() {
            Weekday::Sun => date.checked_add_signed(Duration::days(1)),
            weekday => date.checked_sub_signed(Duration::days(i64::from(weekday.num_days_from_monday()))),
        };
        monday.map(Self).ok_or_else(|| out_of_range(date))
    }

    /// The Monday this key is anchored on.
    pub fn monday(&self) -> NaiveDate {
        self.0
    }
}

/// Sunday on or before `date`: the first column of the displayed week.
pub fn week_start(date: NaiveDate) -> PlannerResult<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_sunday())))
        .ok_or_else(|| out_of_range(date))
}

fn out_of_range(date: NaiveDate) -> PlannerError {
    PlannerError::Validation(format!(
        "Date {} is too close to the end of the calendar to display its week",
        date
    ))
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

/// Parses `YYYY-MM-DD`; any date of the week is accepted and anchored to its key.
impl FromStr for WeekKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), KEY_FORMAT)
            .map_err(|e| PlannerError::Validation(format!("Invalid week key '{}': {}", s, e)))?;
        Self::for_date(date)
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHeader {
    pub day: Day,
    pub date: NaiveDate,
    /// Column header, e.g. `"Segunda (10/11)"`
    pub label: String,
}

/// Header data for one displayed week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub week_key: WeekKey,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// e.g. `"Semana de 09/11 a 15/11"`
    pub title: String,
    pub days: Vec<DayHeader>,
}

impl WeekView {
    /// Builds the view for the week containing `date`.
    ///
    /// A week running past either end of the calendar is a validation error.
    pub fn for_week_start(date: NaiveDate) -> PlannerResult<Self> {
        let start = week_start(date)?;
        let end = start
            .checked_add_signed(Duration::days(6))
            .ok_or_else(|| out_of_range(date))?;

        let days = Day::ALL
            .into_iter()
            .zip(start.iter_days())
            .map(|(day, date)| DayHeader {
                day,
                date,
                label: format!("{} ({})", day.label(), date.format("%d/%m")),
            })
            .collect();

        Ok(Self {
            week_key: WeekKey::for_date(start)?,
            week_start: start,
            week_end: end,
            title: format!("Semana de {} a {}", start.format("%d/%m"), end.format("%d/%m")),
            days,
        })
    }
}
