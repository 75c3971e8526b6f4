//! The device adapter contract and its wire types.
//!
//! A biometric terminal is an opaque, stateful external resource: it must be
//! connected before use, must not be driven concurrently on one connection,
//! and fails often enough that every call returns a [`DeviceError`]. The
//! retry policy lives in the fetcher, not here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error reported by the device adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The terminal could not be reached or the connection handshake failed.
    #[error("failed to connect to terminal: {0}")]
    Connection(String),

    /// A command on an established connection failed.
    #[error("terminal command failed: {0}")]
    Command(String),
}

/// One raw biometric event as reported by the terminal.
///
/// The timestamp is device-local and never null: the adapter represents
/// absence of data by absence of a record, not by a null timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPunch {
    /// The device-enrolled user identifier that produced the punch.
    pub user_id: String,
    /// The instant of the scan, in device-local time.
    pub timestamp: NaiveDateTime,
    /// The terminal's network address. Diagnostic only.
    pub source_ip: String,
}

/// One entry in the terminal's identity roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledUser {
    /// The device-enrolled user identifier.
    pub user_id: String,
    /// The user's display name.
    pub name: String,
    /// The device role code (0 is reserved for "unknown").
    pub role: u32,
}

/// Abstract contract for a biometric clock-in terminal.
///
/// The connection is a single-owner, non-shareable resource: it is acquired
/// at the start of a fetch attempt, used exclusively for the duration of
/// that attempt, and released before control returns to the caller. Callers
/// needing concurrency obtain one connection per run.
///
/// Disconnect errors are non-fatal by contract; callers log and discard
/// them.
pub trait DeviceAdapter {
    /// The adapter's connection handle.
    type Connection: Send;

    /// Opens a connection to the terminal.
    fn connect(&self) -> impl Future<Output = Result<Self::Connection, DeviceError>> + Send;

    /// Retrieves the identity roster of users enrolled on the terminal.
    fn list_enrolled_users(
        &self,
        conn: &mut Self::Connection,
    ) -> impl Future<Output = Result<Vec<EnrolledUser>, DeviceError>> + Send;

    /// Retrieves all punch records currently held by the terminal.
    fn list_punch_records(
        &self,
        conn: &mut Self::Connection,
    ) -> impl Future<Output = Result<Vec<RawPunch>, DeviceError>> + Send;

    /// Releases the connection.
    fn disconnect(
        &self,
        conn: Self::Connection,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;
}
