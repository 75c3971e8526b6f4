//! Shift aggregation.
//!
//! Merges the resolver's Check-In/Check-Out outcome into one shift record
//! and classifies its status. Aggregation never fails: absence of data is a
//! valid terminal state.

use crate::models::{ResolvedShiftWindows, ShiftResolution, ShiftStatus};

/// Classifies a shift from the presence of each punch side.
pub fn classify_status(check_in_present: bool, check_out_present: bool) -> ShiftStatus {
    match (check_in_present, check_out_present) {
        (true, true) => ShiftStatus::Completed,
        (true, false) => ShiftStatus::CheckedIn,
        (false, true) => ShiftStatus::CheckedOut,
        (false, false) => ShiftStatus::NotStarted,
    }
}

/// Merges resolved windows into one employee's shift record.
pub fn aggregate(windows: ResolvedShiftWindows) -> ShiftResolution {
    let status = classify_status(windows.check_in.is_some(), windows.check_out.is_some());
    ShiftResolution {
        employee_id: windows.employee_id,
        employee_name: windows.employee_name,
        employee_role: windows.employee_role,
        check_in: windows.check_in,
        check_out: windows.check_out,
        status,
    }
}
