//! Shift window resolution — the core algorithm.
//!
//! The business shift spans midnight (for example 6pm to 2am), so a punch's
//! role cannot be decided from the record alone: whether it is a Check-In or
//! a Check-Out depends on which side of "now" the observer stands. The
//! resolver first decides, relative to the evaluation instant, which
//! calendar day to search for each side of the shift, then filters that
//! day's punches into an hour-of-day buffer, then picks an extremal punch
//! from the filtered set.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::config::ShiftWindowConfig;
use crate::models::{EmployeeRecordGroup, ResolvedShiftWindows};

/// Resolves one employee's Check-In and Check-Out punches.
///
/// # Algorithm
///
/// 1. If `now` falls before the configured pivot hour (with `now` at
///    exactly midnight always counted as before), the employee is assumed
///    to be on the tail of a shift that began yesterday: the Check-In is
///    searched for on yesterday's date and the Check-Out on today's.
///    Otherwise the shift is assumed to be starting: Check-In today,
///    Check-Out tomorrow.
/// 2. The Check-In is the **last** punch on its search day whose
///    hour-of-day lies in the check-in buffer — the most recent arrival
///    before the shift boundary. Absent if no punch matches.
/// 3. The Check-Out is the **first** punch on its search day whose
///    hour-of-day lies in the check-out buffer. Absent if no punch matches.
///
/// Day membership is decided from calendar components in device-local time,
/// never from elapsed-millisecond arithmetic. An empty side is a valid
/// outcome, not an error; the returned structure always carries the
/// employee's identity so downstream consumers can tell "checked and found
/// nothing" from "never looked."
///
/// For a fixed `now`, configuration and record set the result is fully
/// deterministic.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ShiftWindowConfig;
/// use attendance_engine::models::{EmployeeRecordGroup, PunchRecord};
/// use attendance_engine::pipeline::resolve_windows;
/// use chrono::NaiveDateTime;
///
/// let punch = |ts: &str| PunchRecord {
///     employee_id: "42".to_string(),
///     employee_name: "Ayesha Rahman".to_string(),
///     employee_role: 3,
///     timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
///     source_ip: "192.168.1.201".to_string(),
/// };
///
/// // Queried mid-morning: the 7pm punch from yesterday is the Check-In,
/// // the 7am punch from today is the Check-Out.
/// let group = EmployeeRecordGroup::new(vec![
///     punch("2026-02-10 19:00:00"),
///     punch("2026-02-11 07:00:00"),
/// ]).unwrap();
/// let now = NaiveDateTime::parse_from_str("2026-02-11 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let resolved = resolve_windows(&group, now, &ShiftWindowConfig::default());
/// assert_eq!(resolved.check_in.unwrap().timestamp, punch("2026-02-10 19:00:00").timestamp);
/// assert_eq!(resolved.check_out.unwrap().timestamp, punch("2026-02-11 07:00:00").timestamp);
/// ```
pub fn resolve_windows(
    group: &EmployeeRecordGroup,
    now: NaiveDateTime,
    config: &ShiftWindowConfig,
) -> ResolvedShiftWindows {
    let today = now.date();

    // Midnight-exactly always counts as before the pivot, even when the
    // pivot itself is configured as hour 0.
    let before_pivot =
        now.hour() < config.day_pivot_hour || (now.hour() == 0 && now.minute() == 0);

    let (check_in_day, check_out_day) = if before_pivot {
        (today - Duration::days(1), today)
    } else {
        (today, today + Duration::days(1))
    };

    let check_in = group
        .punches_in_window(check_in_day, &config.check_in_buffer)
        .last()
        .cloned();
    let check_out = group
        .punches_in_window(check_out_day, &config.check_out_buffer)
        .next()
        .cloned();

    ResolvedShiftWindows {
        employee_id: group.employee_id().to_string(),
        employee_name: group.employee_name().to_string(),
        employee_role: group.employee_role(),
        check_in,
        check_out,
    }
}
