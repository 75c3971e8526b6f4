//! Punch record model.
//!
//! This module defines the PunchRecord struct, the identity-enriched form of
//! a raw biometric event.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// The placeholder name used when identity enrichment was not possible.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Unknown Employee";

/// The placeholder role code used when identity enrichment was not possible.
pub const UNKNOWN_EMPLOYEE_ROLE: u32 = 0;

/// One biometric punch event, enriched with employee identity.
///
/// The identity fields are denormalized at enrichment time from the
/// terminal's roster; when the roster lookup failed they hold
/// [`UNKNOWN_EMPLOYEE_NAME`] and [`UNKNOWN_EMPLOYEE_ROLE`]. The timestamp is
/// device-local and always present: absence of data is represented by
/// absence of a record, never a null timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Stable identifier of the device-enrolled user.
    pub employee_id: String,
    /// The employee's display name at enrichment time.
    pub employee_name: String,
    /// The employee's device role code at enrichment time.
    pub employee_role: u32,
    /// The instant of the scan, in device-local time.
    pub timestamp: NaiveDateTime,
    /// The terminal's network address. Diagnostic only.
    pub source_ip: String,
}

impl PunchRecord {
    /// Returns the calendar date of the punch in device-local time.
    ///
    /// Day membership is always decided from year/month/day components, not
    /// elapsed-millisecond arithmetic, so daylight-saving transitions cannot
    /// shift a record into the wrong day.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::PunchRecord;
    /// use chrono::{NaiveDate, NaiveDateTime};
    ///
    /// let punch = PunchRecord {
    ///     employee_id: "42".to_string(),
    ///     employee_name: "Ayesha Rahman".to_string(),
    ///     employee_role: 3,
    ///     timestamp: NaiveDateTime::parse_from_str("2026-02-10 19:03:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     source_ip: "192.168.1.201".to_string(),
    /// };
    /// assert_eq!(punch.calendar_date(), NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
    /// ```
    pub fn calendar_date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the hour-of-day [0, 24) of the punch in device-local time.
    pub fn hour_of_day(&self) -> u32 {
        self.timestamp.hour()
    }
}
