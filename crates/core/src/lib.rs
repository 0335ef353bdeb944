//! # Planner Core
//!
//! Domain types for the weekly appointment planner: weekdays, week keys,
//! slots and schedules, the displayable hour grid, session state and the
//! read-only reference data (procedures and clients) used by the pickers.
//!
//! Everything in this crate is synchronous and free of I/O. Storage lives in
//! `planner-db` and the HTTP surface in `planner-api`.

/// Error taxonomy shared by every planner crate
pub mod errors;
/// Planner data model
pub mod models;

pub use errors::{PlannerError, PlannerResult};
