//! Employee grouping.
//!
//! Partitions a validated punch-record set by employee and hands each
//! partition to the resolver as a sorted [`EmployeeRecordGroup`].

use std::collections::BTreeMap;

use crate::models::{EmployeeRecordGroup, PunchRecord};

/// Partitions punch records by employee identifier.
///
/// Every employee present in any punch record appears in exactly one group;
/// employees with zero punches are not represented — the pipeline is
/// punch-driven, not roster-driven. A `BTreeMap` keeps the per-run output
/// order deterministic.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PunchRecord;
/// use attendance_engine::pipeline::group_by_employee;
/// use chrono::NaiveDateTime;
///
/// let punch = |id: &str, ts: &str| PunchRecord {
///     employee_id: id.to_string(),
///     employee_name: "Ayesha Rahman".to_string(),
///     employee_role: 3,
///     timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
///     source_ip: "192.168.1.201".to_string(),
/// };
///
/// let groups = group_by_employee(vec![
///     punch("7", "2026-02-10 19:00:00"),
///     punch("3", "2026-02-11 06:00:00"),
///     punch("7", "2026-02-11 05:45:00"),
/// ]);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups["7"].records().len(), 2);
/// ```
pub fn group_by_employee(records: Vec<PunchRecord>) -> BTreeMap<String, EmployeeRecordGroup> {
    let mut buckets: BTreeMap<String, Vec<PunchRecord>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.employee_id.clone())
            .or_default()
            .push(record);
    }

    buckets
        .into_iter()
        .filter_map(|(id, punches)| EmployeeRecordGroup::new(punches).map(|group| (id, group)))
        .collect()
}
