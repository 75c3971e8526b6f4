//! Configuration for the Attendance Engine.
//!
//! Shift window boundaries and the fetch retry policy are loaded from YAML
//! files; see [`ConfigLoader`] for the expected directory layout.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, HourWindow, RetryConfig, ShiftWindowConfig};
