pub mod api;
pub mod day;
pub mod grid;
pub mod reference;
pub mod schedule;
pub mod session;
pub mod week;

pub use day::Day;
pub use grid::{GridCell, GridConfig, GridFilter, GridRow};
pub use reference::{Appointment, ClientRecord, PickerOption, ProcedureRecord, ReferenceData};
pub use schedule::{RunReport, Schedule, Slot, SlotRecord};
pub use session::SessionState;
pub use week::{DayHeader, WeekKey, WeekView};
