//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod punch;
mod record_group;
mod resolution;

pub use punch::{PunchRecord, UNKNOWN_EMPLOYEE_NAME, UNKNOWN_EMPLOYEE_ROLE};
pub use record_group::EmployeeRecordGroup;
pub use resolution::{ResolvedShiftWindows, ShiftResolution, ShiftStatus};
