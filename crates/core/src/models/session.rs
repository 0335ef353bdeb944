use chrono::{Duration, NaiveDate};

use crate::errors::{PlannerError, PlannerResult};
use crate::models::day::Day;
use crate::models::grid::GridConfig;
use crate::models::schedule::{Schedule, Slot};
use crate::models::week::{WeekKey, WeekView};

/// The week currently on screen and its in-memory schedule.
///
/// Navigation only moves the week pointer; saving the outgoing schedule and
/// loading the incoming one belongs to whoever owns the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    week: WeekView,
    schedule: Schedule,
}

impl SessionState {
    pub fn starting_at(date: NaiveDate, schedule: Schedule) -> PlannerResult<Self> {
        Ok(Self {
            week: WeekView::for_week_start(date)?,
            schedule,
        })
    }

    pub fn week_key(&self) -> WeekKey {
        self.week.week_key
    }

    /// Sunday of the displayed week.
    pub fn week_start(&self) -> NaiveDate {
        self.week.week_start
    }

    pub fn view(&self) -> WeekView {
        self.week.clone()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Sunday start `weeks` weeks away from the current one.
    pub fn shifted_start(&self, weeks: i64) -> PlannerResult<NaiveDate> {
        Duration::try_weeks(weeks)
            .and_then(|offset| self.week.week_start.checked_add_signed(offset))
            .ok_or_else(|| {
                PlannerError::Validation(format!(
                    "Cannot move {} weeks from {}: outside the calendar",
                    weeks, self.week.week_key
                ))
            })
    }

    /// Switches to the week containing `date` with its loaded `schedule`,
    /// returning the outgoing schedule. On error the session is unchanged.
    pub fn enter_week(&mut self, date: NaiveDate, schedule: Schedule) -> PlannerResult<Schedule> {
        self.week = WeekView::for_week_start(date)?;
        Ok(std::mem::replace(&mut self.schedule, schedule))
    }

    pub fn assign(&mut self, grid: &GridConfig, day: Day, hour: u8, content: &str) -> PlannerResult<Option<Slot>> {
        self.schedule.assign(grid, day, hour, content)
    }

    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }
}
