//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST endpoint that exposes per-employee shift
//! resolutions as JSON to downstream automation.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, AttendanceResponse};
pub use state::AppState;
