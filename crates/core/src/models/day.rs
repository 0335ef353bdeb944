use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::errors::PlannerError;

/// A column of the planner grid.
///
/// Columns run Sunday first, and the serialized form is the label shown in
/// the grid header (`"Segunda"`, `"Terça"`, ...), which is also what the
/// persisted `dia` field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "Domingo")]
    Sunday,
    #[serde(rename = "Segunda")]
    Monday,
    #[serde(rename = "Terça")]
    Tuesday,
    #[serde(rename = "Quarta")]
    Wednesday,
    #[serde(rename = "Quinta")]
    Thursday,
    #[serde(rename = "Sexta")]
    Friday,
    #[serde(rename = "Sábado")]
    Saturday,
}

impl Day {
    /// All columns in grid order.
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Day::Sunday => "Domingo",
            Day::Monday => "Segunda",
            Day::Tuesday => "Terça",
            Day::Wednesday => "Quarta",
            Day::Thursday => "Quinta",
            Day::Friday => "Sexta",
            Day::Saturday => "Sábado",
        }
    }

    /// Zero-based column index, Sunday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn from_label(label: &str) -> Option<Day> {
        let label = label.trim();
        Self::ALL.into_iter().find(|day| day.label() == label)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::from_label(s).ok_or_else(|| PlannerError::Validation(format!("Unknown day label: {}", s)))
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Day::Sunday,
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Sunday => Weekday::Sun,
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
        }
    }
}
