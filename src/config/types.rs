//! Configuration types for attendance resolution.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A half-open hour-of-day range `[start, end)`.
///
/// Both bounds are hours in `[0, 24]`; `start < end` always holds for a
/// validated window, so a single window never wraps around midnight.
/// Midnight-spanning behavior comes from combining two windows on two
/// calendar days, not from wraparound inside one window.
///
/// # Example
///
/// ```
/// use attendance_engine::config::HourWindow;
///
/// let evening = HourWindow { start: 12, end: 24 };
/// assert!(evening.contains(12)); // lower bound inclusive
/// assert!(evening.contains(23));
/// assert!(!evening.contains(11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    /// Inclusive lower hour bound.
    pub start: u32,
    /// Exclusive upper hour bound.
    pub end: u32,
}

impl HourWindow {
    /// Returns true if the given hour-of-day lies within the window.
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }

    fn validate(&self, field: &str) -> EngineResult<()> {
        if self.end > 24 {
            return Err(EngineError::InvalidWindowConfig {
                field: field.to_string(),
                message: format!("end hour {} exceeds 24", self.end),
            });
        }
        if self.start >= self.end {
            return Err(EngineError::InvalidWindowConfig {
                field: field.to_string(),
                message: format!("start hour {} must be less than end hour {}", self.start, self.end),
            });
        }
        Ok(())
    }
}

/// Immutable per-resolution-run shift window configuration.
///
/// The pivot hour decides, relative to the evaluation instant, which
/// calendar day is searched for each side of the shift; the buffers decide
/// which hours of that day are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindowConfig {
    /// Hour in `[0, 24)` separating the "early" and "late" interpretations
    /// of the evaluation instant. Noon in production.
    pub day_pivot_hour: u32,
    /// Eligible hours for a Check-In punch on its search day.
    pub check_in_buffer: HourWindow,
    /// Eligible hours for a Check-Out punch on its search day.
    pub check_out_buffer: HourWindow,
}

impl Default for ShiftWindowConfig {
    fn default() -> Self {
        Self {
            day_pivot_hour: 12,
            check_in_buffer: HourWindow { start: 12, end: 24 },
            check_out_buffer: HourWindow { start: 0, end: 12 },
        }
    }
}

impl ShiftWindowConfig {
    /// Validates the configured hours.
    pub fn validate(&self) -> EngineResult<()> {
        if self.day_pivot_hour >= 24 {
            return Err(EngineError::InvalidWindowConfig {
                field: "day_pivot_hour".to_string(),
                message: format!("pivot hour {} must be below 24", self.day_pivot_hour),
            });
        }
        self.check_in_buffer.validate("check_in_buffer")?;
        self.check_out_buffer.validate("check_out_buffer")?;
        Ok(())
    }
}

/// Retry policy for the resilient fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of fetch attempts per run.
    pub max_attempts: u32,
    /// Record count at which a dataset is accepted without further retries.
    pub min_acceptable_records: usize,
    /// Backoff delay before the first retry, in milliseconds. Doubles on
    /// each subsequent retry.
    pub base_delay_ms: u64,
    /// Ceiling on the backoff delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_acceptable_records: 50,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
        }
    }
}

impl RetryConfig {
    /// Validates the retry policy.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_attempts == 0 {
            return Err(EngineError::InvalidWindowConfig {
                field: "max_attempts".to_string(),
                message: "at least one attempt is required".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the backoff base delay as a [`Duration`].
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Returns the backoff delay ceiling as a [`Duration`].
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// The full engine configuration: window boundaries plus retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Shift window boundaries.
    pub windows: ShiftWindowConfig,
    /// Fetch retry policy.
    pub retry: RetryConfig,
}

impl EngineConfig {
    /// Validates both configuration sections.
    pub fn validate(&self) -> EngineResult<()> {
        self.windows.validate()?;
        self.retry.validate()?;
        Ok(())
    }
}
