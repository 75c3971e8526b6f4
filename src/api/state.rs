//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::device::{Clock, DeviceAdapter, SystemClock};
use crate::pipeline::AttendancePipeline;

/// Shared application state.
///
/// Contains the device adapter, the validated engine configuration and the
/// clock. The adapter is generic so tests can inject a scripted device; the
/// clock is dynamic so tests can pin the evaluation instant.
#[derive(Clone)]
pub struct AppState<A> {
    adapter: A,
    config: EngineConfig,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<A> AppState<A> {
    /// Creates application state with the system clock.
    pub fn new(adapter: A, config: EngineConfig) -> Self {
        Self {
            adapter,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock. Intended for tests.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl<A> AppState<A>
where
    A: DeviceAdapter + Clone,
{
    /// Builds a fresh pipeline for one run. Each run obtains its own device
    /// connection, so concurrent requests never interleave on one.
    pub(crate) fn pipeline(&self) -> AttendancePipeline<A, Arc<dyn Clock + Send + Sync>> {
        AttendancePipeline::new(self.adapter.clone(), self.clock.clone(), self.config)
    }
}
