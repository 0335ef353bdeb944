use serde::{Deserialize, Serialize};

use crate::errors::{PlannerError, PlannerResult};
use crate::models::day::Day;
use crate::models::grid::{hour_label, parse_hour_label, GridCell, GridConfig, GridFilter, GridRow};

/// One assignment at a `(day, hour)` coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub day: Day,
    pub hour: u8,
    pub content: String,
}

/// Persisted shape of a slot: `{"dia": "Segunda", "hora": "9:00", "conteudo": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub dia: String,
    pub hora: String,
    pub conteudo: String,
}

impl From<&Slot> for SlotRecord {
    fn from(slot: &Slot) -> Self {
        Self {
            dia: slot.day.label().to_string(),
            hora: hour_label(slot.hour),
            conteudo: slot.content.clone(),
        }
    }
}

impl TryFrom<SlotRecord> for Slot {
    type Error = PlannerError;

    fn try_from(record: SlotRecord) -> Result<Self, Self::Error> {
        let day = record.dia.parse()?;
        let hour = parse_hour_label(&record.hora)
            .ok_or_else(|| PlannerError::Validation(format!("Invalid hour label: {}", record.hora)))?;
        let content = record.conteudo.trim();
        if content.is_empty() {
            return Err(PlannerError::Validation(format!(
                "Empty content at {} {}",
                record.dia, record.hora
            )));
        }

        Ok(Slot {
            day,
            hour,
            content: content.to_string(),
        })
    }
}

/// Outcome of a completed multi-hour fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub day: Day,
    pub start_hour: u8,
    pub hours_written: u32,
}

/// The slots of one week (or of the whole planner, in the flat layout).
///
/// Holds at most one slot per `(day, hour)`; writing to an occupied
/// coordinate replaces its content in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    slots: Vec<Slot>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from slots in order; a later slot at the same
    /// coordinate overwrites an earlier one.
    pub fn from_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        let mut schedule = Self::new();
        for slot in slots {
            schedule.set(slot.day, slot.hour, &slot.content);
        }
        schedule
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn find_slot(&self, day: Day, hour: u8) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|slot| slot.day == day && slot.hour == hour)
    }

    /// Writes `content` at `(day, hour)` without range checks, returning the
    /// replaced slot. Blank content clears the cell.
    pub fn set(&mut self, day: Day, hour: u8, content: &str) -> Option<Slot> {
        let content = content.trim();
        if content.is_empty() {
            return self.clear(day, hour);
        }

        let slot = Slot {
            day,
            hour,
            content: content.to_string(),
        };
        match self.position(day, hour) {
            Some(index) => Some(std::mem::replace(&mut self.slots[index], slot)),
            None => {
                self.slots.push(slot);
                None
            }
        }
    }

    pub fn clear(&mut self, day: Day, hour: u8) -> Option<Slot> {
        self.position(day, hour).map(|index| self.slots.remove(index))
    }

    /// Single-cell assignment from the grid; the hour must be displayable.
    pub fn assign(&mut self, grid: &GridConfig, day: Day, hour: u8, content: &str) -> PlannerResult<Option<Slot>> {
        grid.check_hour(hour)?;
        Ok(self.set(day, hour, content))
    }

    /// Writes `content` into `duration_hours` consecutive rows of `day`,
    /// starting at `start_hour`.
    ///
    /// A duration of zero is treated as one hour. When the run reaches an
    /// hour past the grid it stops with [`PlannerError::InsufficientSlots`];
    /// the hours written before that point are kept.
    pub fn fill_run(
        &mut self,
        grid: &GridConfig,
        day: Day,
        start_hour: u8,
        duration_hours: u32,
        content: &str,
    ) -> PlannerResult<RunReport> {
        grid.check_hour(start_hour)?;
        if content.trim().is_empty() {
            return Err(PlannerError::Validation("Run content must not be empty".to_string()));
        }

        let duration = duration_hours.max(1);
        for offset in 0..duration {
            let hour = u32::from(start_hour) + offset;
            if !grid.contains(hour) {
                return Err(PlannerError::InsufficientSlots {
                    duration,
                    missing_hour: hour,
                });
            }
            // contains() bounds hour below 24
            self.set(day, hour as u8, content);
        }

        Ok(RunReport {
            day,
            start_hour,
            hours_written: duration,
        })
    }

    /// The non-empty cells of the displayed grid, row by row and then in
    /// column order. Slots outside `grid` are not included.
    pub fn to_records(&self, grid: &GridConfig) -> Vec<SlotRecord> {
        grid.hours()
            .flat_map(|hour| {
                Day::ALL
                    .into_iter()
                    .filter_map(move |day| self.find_slot(day, hour))
            })
            .map(SlotRecord::from)
            .collect()
    }

    /// Grid rows restricted by `filter`.
    pub fn grid_rows(&self, grid: &GridConfig, filter: &GridFilter) -> Vec<GridRow> {
        grid.hours()
            .filter(|hour| filter.shows_hour(*hour))
            .map(|hour| GridRow {
                hour,
                label: hour_label(hour),
                cells: Day::ALL
                    .into_iter()
                    .filter(|day| filter.shows_day(*day))
                    .map(|day| GridCell {
                        day,
                        content: self.find_slot(day, hour).map(|slot| slot.content.clone()),
                    })
                    .collect(),
            })
            .collect()
    }

    fn position(&self, day: Day, hour: u8) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.day == day && slot.hour == hour)
    }
}
