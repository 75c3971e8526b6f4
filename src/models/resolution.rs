//! Shift resolution output models.
//!
//! This module defines the per-employee output of a resolution run: the
//! resolved Check-In/Check-Out punches and the classified shift status.

use serde::{Deserialize, Serialize};

use super::PunchRecord;

/// The classified state of one employee's overnight shift.
///
/// Serialized in kebab-case to match the downstream automation contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftStatus {
    /// Neither a check-in nor a check-out punch was found.
    NotStarted,
    /// Only a check-in punch was found.
    CheckedIn,
    /// Only a check-out punch was found.
    CheckedOut,
    /// Both punches were found.
    Completed,
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftStatus::NotStarted => write!(f, "not-started"),
            ShiftStatus::CheckedIn => write!(f, "checked-in"),
            ShiftStatus::CheckedOut => write!(f, "checked-out"),
            ShiftStatus::Completed => write!(f, "completed"),
        }
    }
}

/// The resolver's raw output for one employee, before status
/// classification.
///
/// The identity triple is always populated (copied from the employee's
/// record group) even when both punch sides are absent, so downstream
/// consumers can distinguish "we checked and found nothing" from "we never
/// looked."
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShiftWindows {
    /// Stable identifier of the device-enrolled user.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's device role code.
    pub employee_role: u32,
    /// The punch resolved as the shift's Check-In, if any.
    pub check_in: Option<PunchRecord>,
    /// The punch resolved as the shift's Check-Out, if any.
    pub check_out: Option<PunchRecord>,
}

/// One employee's fully aggregated shift record.
///
/// Created fresh on every resolution run and discarded after the response
/// is produced; there is no persisted identity between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftResolution {
    /// Stable identifier of the device-enrolled user.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's device role code.
    pub employee_role: u32,
    /// The punch resolved as the shift's Check-In, or null.
    pub check_in: Option<PunchRecord>,
    /// The punch resolved as the shift's Check-Out, or null.
    pub check_out: Option<PunchRecord>,
    /// The classified shift status.
    pub status: ShiftStatus,
}
