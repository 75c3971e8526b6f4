//! Employee record group model.
//!
//! This module defines the EmployeeRecordGroup struct: all punches for one
//! employee, held for the duration of a single resolution pass.

use chrono::NaiveDate;

use crate::config::HourWindow;

use super::PunchRecord;

/// All punch records for one employee, sorted ascending by timestamp.
///
/// The group is owned transiently by one resolution pass. It is never
/// mutated after construction, only filtered into views. Sorting is stable:
/// punches at the same instant keep their input order, which the source
/// device leaves unspecified and must not be treated as meaningful.
///
/// Invariant: a group always contains at least one record. Employees with
/// zero punches are simply not represented — the pipeline is punch-driven,
/// not roster-driven.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecordGroup {
    records: Vec<PunchRecord>,
}

impl EmployeeRecordGroup {
    /// Builds a group from one employee's punches, sorting them ascending
    /// by timestamp.
    ///
    /// Returns `None` for an empty input, which upholds the non-empty
    /// invariant.
    pub fn new(mut records: Vec<PunchRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        records.sort_by_key(|r| r.timestamp);
        Some(Self { records })
    }

    /// Returns the employee identifier shared by every record in the group.
    pub fn employee_id(&self) -> &str {
        &self.records[0].employee_id
    }

    /// Returns the employee name carried by the group's records.
    pub fn employee_name(&self) -> &str {
        &self.records[0].employee_name
    }

    /// Returns the employee role code carried by the group's records.
    pub fn employee_role(&self) -> u32 {
        self.records[0].employee_role
    }

    /// Returns the sorted records.
    pub fn records(&self) -> &[PunchRecord] {
        &self.records
    }

    /// Returns the punches on the given calendar day whose hour-of-day lies
    /// within the given half-open window, in ascending timestamp order.
    pub fn punches_in_window<'a>(
        &'a self,
        day: NaiveDate,
        window: &'a HourWindow,
    ) -> impl Iterator<Item = &'a PunchRecord> {
        self.records
            .iter()
            .filter(move |r| r.calendar_date() == day && window.contains(r.hour_of_day()))
    }
}
