//! Resilient punch acquisition.
//!
//! The terminal is unreliable: connections drop, commands time out, and a
//! read can come back with fewer records than the device actually holds.
//! The fetcher wraps the device adapter with retry, exponential backoff and
//! a "good-enough data" heuristic, and enriches the raw punches with the
//! identity roster on a best-effort basis.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::device::{DeviceAdapter, DeviceError, EnrolledUser, RawPunch};
use crate::error::{EngineError, EngineResult};
use crate::models::{PunchRecord, UNKNOWN_EMPLOYEE_NAME, UNKNOWN_EMPLOYEE_ROLE};

/// The outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    /// The identity-enriched punch records.
    pub records: Vec<PunchRecord>,
    /// How many attempts were made, including the accepted one.
    pub attempts: u32,
    /// Whether the identity roster was applied. False means every record
    /// carries placeholder identity.
    pub roster_applied: bool,
    /// Whether the accepted dataset met the acceptance floor. False means
    /// this is the best-available fallback after exhausting all attempts.
    pub met_floor: bool,
}

/// Computes the backoff delay before retry number `attempt`.
///
/// The base delay doubles for each completed attempt and is capped at
/// `cap`. The function is pure; no retry state survives a fetch call.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use attendance_engine::pipeline::backoff_delay;
///
/// let base = Duration::from_millis(500);
/// let cap = Duration::from_secs(8);
/// assert_eq!(backoff_delay(1, base, cap), Duration::from_millis(500));
/// assert_eq!(backoff_delay(2, base, cap), Duration::from_millis(1000));
/// assert_eq!(backoff_delay(3, base, cap), Duration::from_millis(2000));
/// assert_eq!(backoff_delay(10, base, cap), cap);
/// ```
pub fn backoff_delay(attempt: u32, base: Duration, cap: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    base.saturating_mul(2u32.saturating_pow(exponent)).min(cap)
}

/// Joins raw punches with the identity roster.
///
/// Punches whose user is missing from the roster, or all punches when the
/// roster is unavailable, receive placeholder identity. Identity enrichment
/// is best-effort and never fails.
pub fn enrich(raw: Vec<RawPunch>, roster: Option<&[EnrolledUser]>) -> Vec<PunchRecord> {
    let by_id: HashMap<&str, &EnrolledUser> = roster
        .unwrap_or_default()
        .iter()
        .map(|user| (user.user_id.as_str(), user))
        .collect();

    raw.into_iter()
        .map(|punch| {
            let identity = by_id.get(punch.user_id.as_str());
            PunchRecord {
                employee_name: identity
                    .map_or_else(|| UNKNOWN_EMPLOYEE_NAME.to_string(), |u| u.name.clone()),
                employee_role: identity.map_or(UNKNOWN_EMPLOYEE_ROLE, |u| u.role),
                employee_id: punch.user_id,
                timestamp: punch.timestamp,
                source_ip: punch.source_ip,
            }
        })
        .collect()
}

/// One attempt's enriched dataset.
#[derive(Debug)]
struct AttemptData {
    records: Vec<PunchRecord>,
    roster_applied: bool,
}

/// Wraps a [`DeviceAdapter`] with retry, backoff and the best-available
/// heuristic.
///
/// The connection is a single-owner resource. It is reused across attempts
/// while healthy; any failed device command marks it broken, it is released,
/// and the next attempt reconnects from scratch. Every exit path releases
/// the connection, and disconnect errors are logged and swallowed, never
/// escalated.
#[derive(Debug)]
pub struct ResilientFetcher<A> {
    adapter: A,
    base_delay: Duration,
    max_delay: Duration,
}

impl<A: DeviceAdapter> ResilientFetcher<A> {
    /// Creates a fetcher with the given backoff timing.
    pub fn new(adapter: A, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            adapter,
            base_delay,
            max_delay,
        }
    }

    /// Pulls a complete punch dataset from the terminal.
    ///
    /// A dataset is accepted immediately once its record count reaches
    /// `min_acceptable`; otherwise the highest-count dataset seen so far is
    /// retained and another attempt is made, up to `max_attempts`, with
    /// exponential backoff between attempts. On exhaustion the
    /// best-available dataset is returned rather than failing, unless it is
    /// empty, in which case the call fails with
    /// [`EngineError::DataUnavailable`] carrying the last underlying device
    /// error.
    pub async fn fetch(&self, max_attempts: u32, min_acceptable: usize) -> EngineResult<FetchReport> {
        let mut conn: Option<A::Connection> = None;
        let mut best: Option<AttemptData> = None;
        let mut last_error: Option<DeviceError> = None;
        let mut attempts = 0;
        let mut met_floor = false;

        for attempt in 1..=max_attempts.max(1) {
            attempts = attempt;
            if attempt > 1 {
                sleep(backoff_delay(attempt - 1, self.base_delay, self.max_delay)).await;
            }

            let active = match conn.as_mut() {
                Some(open) => open,
                None => match self.adapter.connect().await {
                    Ok(fresh) => {
                        debug!(attempt, "connected to terminal");
                        conn.insert(fresh)
                    }
                    Err(e) => {
                        warn!(attempt, error = %e, "terminal connection failed");
                        last_error = Some(e);
                        continue;
                    }
                },
            };

            match self.pull(active).await {
                Ok(data) => {
                    let count = data.records.len();
                    debug!(attempt, count, "retrieved punch records");
                    if count > 0 && count >= min_acceptable {
                        best = Some(data);
                        met_floor = true;
                        break;
                    }
                    if best.as_ref().map_or(true, |b| count > b.records.len()) {
                        best = Some(data);
                    }
                }
                Err(e) => {
                    warn!(attempt, error = %e, "punch retrieval failed");
                    last_error = Some(e);
                    // Connection state is unknown after a failed command.
                    // Release it so the next attempt reconnects.
                    self.release(&mut conn).await;
                }
            }
        }

        self.release(&mut conn).await;

        match best {
            Some(data) if !data.records.is_empty() => {
                if !met_floor {
                    info!(
                        count = data.records.len(),
                        attempts, "acceptance floor not met, returning best-available dataset"
                    );
                }
                Ok(FetchReport {
                    records: data.records,
                    attempts,
                    roster_applied: data.roster_applied,
                    met_floor,
                })
            }
            _ => Err(EngineError::DataUnavailable {
                attempts,
                source: last_error.unwrap_or_else(|| {
                    DeviceError::Command("terminal returned no punch records".to_string())
                }),
            }),
        }
    }

    /// Retrieves punches and the identity roster on one connection.
    ///
    /// A punch retrieval failure aborts the attempt; a roster failure does
    /// not. Identity enrichment is best-effort and not required for the
    /// correctness of shift resolution.
    async fn pull(&self, conn: &mut A::Connection) -> Result<AttemptData, DeviceError> {
        let raw = self.adapter.list_punch_records(conn).await?;
        let roster = match self.adapter.list_enrolled_users(conn).await {
            Ok(users) => Some(users),
            Err(e) => {
                warn!(error = %e, "identity roster unavailable, using placeholder identities");
                None
            }
        };
        Ok(AttemptData {
            roster_applied: roster.is_some(),
            records: enrich(raw, roster.as_deref()),
        })
    }

    /// Releases the connection if one is open. Disconnect errors are logged
    /// and discarded.
    async fn release(&self, conn: &mut Option<A::Connection>) {
        if let Some(open) = conn.take() {
            if let Err(e) = self.adapter.disconnect(open).await {
                warn!(error = %e, "terminal disconnect failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    /// What one scripted attempt against the fake terminal should do.
    #[derive(Debug, Clone)]
    enum Step {
        ConnectFail,
        PunchesFail,
        Punches(usize),
    }

    #[derive(Clone, Default)]
    struct ScriptedDevice {
        script: Arc<Mutex<VecDeque<Step>>>,
        connects: Arc<AtomicU32>,
        disconnects: Arc<AtomicU32>,
    }

    impl ScriptedDevice {
        fn with_script(steps: Vec<Step>) -> Self {
            Self {
                script: Arc::new(Mutex::new(steps.into())),
                ..Default::default()
            }
        }

        fn next_step(&self) -> Step {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")
        }

        fn peek_is_connect_fail(&self) -> bool {
            matches!(
                self.script.lock().unwrap().front(),
                Some(Step::ConnectFail)
            )
        }
    }

    fn make_raw(count: usize) -> Vec<RawPunch> {
        (0..count)
            .map(|i| RawPunch {
                user_id: format!("{}", i % 7),
                timestamp: NaiveDateTime::parse_from_str(
                    "2026-02-10 18:00:00",
                    "%Y-%m-%d %H:%M:%S",
                )
                .unwrap()
                    + chrono::Duration::minutes(i as i64),
                source_ip: "192.168.1.201".to_string(),
            })
            .collect()
    }

    fn make_roster() -> Vec<EnrolledUser> {
        (0..7)
            .map(|i| EnrolledUser {
                user_id: format!("{i}"),
                name: format!("Employee {i}"),
                role: 3,
            })
            .collect()
    }

    impl DeviceAdapter for ScriptedDevice {
        type Connection = ();

        async fn connect(&self) -> Result<(), DeviceError> {
            if self.peek_is_connect_fail() {
                self.next_step();
                return Err(DeviceError::Connection("host unreachable".to_string()));
            }
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn list_enrolled_users(&self, _conn: &mut ()) -> Result<Vec<EnrolledUser>, DeviceError> {
            Ok(make_roster())
        }

        async fn list_punch_records(&self, _conn: &mut ()) -> Result<Vec<RawPunch>, DeviceError> {
            match self.next_step() {
                Step::Punches(count) => Ok(make_raw(count)),
                Step::PunchesFail => Err(DeviceError::Command("read timed out".to_string())),
                Step::ConnectFail => unreachable!("connect failures are consumed in connect()"),
            }
        }

        async fn disconnect(&self, _conn: ()) -> Result<(), DeviceError> {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// A device whose roster call always fails.
    #[derive(Clone)]
    struct RosterlessDevice(ScriptedDevice);

    impl DeviceAdapter for RosterlessDevice {
        type Connection = ();

        async fn connect(&self) -> Result<(), DeviceError> {
            self.0.connect().await
        }

        async fn list_enrolled_users(&self, _conn: &mut ()) -> Result<Vec<EnrolledUser>, DeviceError> {
            Err(DeviceError::Command("roster read failed".to_string()))
        }

        async fn list_punch_records(&self, conn: &mut ()) -> Result<Vec<RawPunch>, DeviceError> {
            self.0.list_punch_records(conn).await
        }

        async fn disconnect(&self, conn: ()) -> Result<(), DeviceError> {
            self.0.disconnect(conn).await
        }
    }

    fn fetcher<A: DeviceAdapter>(adapter: A) -> ResilientFetcher<A> {
        // Zero delays keep the retry tests instant.
        ResilientFetcher::new(adapter, Duration::ZERO, Duration::ZERO)
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let base = Duration::from_millis(500);
        let cap = Duration::from_secs(8);
        assert_eq!(backoff_delay(1, base, cap), Duration::from_millis(500));
        assert_eq!(backoff_delay(2, base, cap), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(3, base, cap), Duration::from_millis(2_000));
        assert_eq!(backoff_delay(5, base, cap), Duration::from_millis(8_000));
        assert_eq!(backoff_delay(6, base, cap), cap);
        assert_eq!(backoff_delay(60, base, cap), cap);
    }

    #[test]
    fn test_enrich_applies_roster_identity() {
        let records = enrich(make_raw(3), Some(&make_roster()));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].employee_name, "Employee 0");
        assert_eq!(records[0].employee_role, 3);
        assert_eq!(records[1].employee_id, "1");
    }

    #[test]
    fn test_enrich_without_roster_uses_placeholders() {
        let records = enrich(make_raw(2), None);
        assert_eq!(records[0].employee_name, UNKNOWN_EMPLOYEE_NAME);
        assert_eq!(records[0].employee_role, UNKNOWN_EMPLOYEE_ROLE);
        // The id still comes through so shift math stays correct
        assert_eq!(records[1].employee_id, "1");
    }

    #[test]
    fn test_enrich_with_partial_roster() {
        let roster = vec![EnrolledUser {
            user_id: "0".to_string(),
            name: "Employee 0".to_string(),
            role: 3,
        }];
        let records = enrich(make_raw(2), Some(&roster));
        assert_eq!(records[0].employee_name, "Employee 0");
        assert_eq!(records[1].employee_name, UNKNOWN_EMPLOYEE_NAME);
    }

    #[tokio::test]
    async fn test_accepts_first_attempt_meeting_floor() {
        let device = ScriptedDevice::with_script(vec![Step::Punches(60)]);
        let report = fetcher(device.clone()).fetch(3, 50).await.unwrap();

        assert_eq!(report.records.len(), 60);
        assert_eq!(report.attempts, 1);
        assert!(report.met_floor);
        assert!(report.roster_applied);
        assert_eq!(device.disconnects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_returns_largest_dataset_after_exhausting_attempts() {
        let device = ScriptedDevice::with_script(vec![
            Step::Punches(10),
            Step::Punches(30),
            Step::Punches(20),
        ]);
        let report = fetcher(device.clone()).fetch(3, 50).await.unwrap();

        assert_eq!(report.records.len(), 30);
        assert_eq!(report.attempts, 3);
        assert!(!report.met_floor);
    }

    #[tokio::test]
    async fn test_failures_then_success_meets_floor() {
        // Scenario: the device fails twice, then yields 60 records with a
        // floor of 50.
        let device = ScriptedDevice::with_script(vec![
            Step::PunchesFail,
            Step::PunchesFail,
            Step::Punches(60),
        ]);
        let report = fetcher(device.clone()).fetch(3, 50).await.unwrap();

        assert_eq!(report.records.len(), 60);
        assert_eq!(report.attempts, 3);
        assert!(report.met_floor);
        // Each failed command releases the broken connection, so three
        // connects and three disconnects in total.
        assert_eq!(device.connects.load(Ordering::SeqCst), 3);
        assert_eq!(device.disconnects.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_connect_failures_are_retried() {
        let device = ScriptedDevice::with_script(vec![
            Step::ConnectFail,
            Step::ConnectFail,
            Step::Punches(5),
        ]);
        let report = fetcher(device.clone()).fetch(3, 1).await.unwrap();

        assert_eq!(report.records.len(), 5);
        assert_eq!(report.attempts, 3);
        assert_eq!(device.connects.load(Ordering::SeqCst), 1);
        assert_eq!(device.disconnects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_healthy_connection_is_reused_across_attempts() {
        let device = ScriptedDevice::with_script(vec![Step::Punches(1), Step::Punches(2)]);
        let report = fetcher(device.clone()).fetch(2, 50).await.unwrap();

        assert_eq!(report.records.len(), 2);
        // Both attempts ran on one connection, released exactly once.
        assert_eq!(device.connects.load(Ordering::SeqCst), 1);
        assert_eq!(device.disconnects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_attempts_failing_yields_data_unavailable() {
        let device = ScriptedDevice::with_script(vec![
            Step::PunchesFail,
            Step::PunchesFail,
            Step::PunchesFail,
        ]);
        let error = fetcher(device.clone()).fetch(3, 50).await.unwrap_err();

        match error {
            EngineError::DataUnavailable { attempts, source } => {
                assert_eq!(attempts, 3);
                assert_eq!(source, DeviceError::Command("read timed out".to_string()));
            }
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
        // No connection left open on the failure path either.
        assert_eq!(
            device.connects.load(Ordering::SeqCst),
            device.disconnects.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn test_empty_successes_yield_data_unavailable() {
        let device = ScriptedDevice::with_script(vec![Step::Punches(0), Step::Punches(0)]);
        let error = fetcher(device).fetch(2, 50).await.unwrap_err();

        match error {
            EngineError::DataUnavailable { attempts, source } => {
                assert_eq!(attempts, 2);
                assert_eq!(
                    source,
                    DeviceError::Command("terminal returned no punch records".to_string())
                );
            }
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_roster_failure_is_recovered_with_placeholders() {
        let device = RosterlessDevice(ScriptedDevice::with_script(vec![Step::Punches(4)]));
        let report = fetcher(device).fetch(3, 1).await.unwrap();

        assert_eq!(report.records.len(), 4);
        assert!(!report.roster_applied);
        assert!(report.met_floor);
        assert!(report
            .records
            .iter()
            .all(|r| r.employee_name == UNKNOWN_EMPLOYEE_NAME && r.employee_role == 0));
    }
}
