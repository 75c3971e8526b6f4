//! The attendance acquisition and shift resolution pipeline.
//!
//! Stages, in dependency order: the [`ResilientFetcher`] acquires an
//! identity-enriched punch set from the device, [`group_by_employee`]
//! partitions it, [`resolve_windows`] decides each employee's Check-In and
//! Check-Out, and [`aggregate`] classifies the shift status.
//! [`AttendancePipeline`] wires the stages together for one run.
//!
//! A run owns all of its data; the only cross-run shared resource is the
//! physical device connection, which each run acquires and releases itself.
//! There is no cancellation primitive — callers needing timeouts impose an
//! external deadline around the whole run.

mod aggregator;
mod fetcher;
mod grouper;
mod resolver;

pub use aggregator::{aggregate, classify_status};
pub use fetcher::{backoff_delay, enrich, FetchReport, ResilientFetcher};
pub use grouper::group_by_employee;
pub use resolver::resolve_windows;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::EngineConfig;
use crate::device::{Clock, DeviceAdapter};
use crate::error::EngineResult;
use crate::models::ShiftResolution;

/// The result of one full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// One shift record per employee seen in the punch data, ordered by
    /// employee identifier.
    pub resolutions: Vec<ShiftResolution>,
    /// The evaluation instant the windows were resolved against.
    pub evaluated_at: NaiveDateTime,
    /// How many fetch attempts the run took.
    pub attempts: u32,
    /// True when the run succeeded in a degraded mode: the identity roster
    /// was unavailable or the record count stayed below the acceptance
    /// floor.
    pub low_confidence: bool,
}

/// Wires the pipeline stages together for per-request runs.
///
/// Each run is self-contained: no state survives between runs.
#[derive(Debug)]
pub struct AttendancePipeline<A, C> {
    fetcher: ResilientFetcher<A>,
    clock: C,
    config: EngineConfig,
}

impl<A, C> AttendancePipeline<A, C>
where
    A: DeviceAdapter,
    C: Clock,
{
    /// Creates a pipeline around a device adapter and clock.
    pub fn new(adapter: A, clock: C, config: EngineConfig) -> Self {
        let fetcher = ResilientFetcher::new(adapter, config.retry.base_delay(), config.retry.max_delay());
        Self {
            fetcher,
            clock,
            config,
        }
    }

    /// Runs fetch, group, resolve and aggregate once.
    pub async fn run(&self) -> EngineResult<PipelineOutcome> {
        let retry = self.config.retry;
        let report = self
            .fetcher
            .fetch(retry.max_attempts, retry.min_acceptable_records)
            .await?;

        let evaluated_at = self.clock.now();
        let groups = group_by_employee(report.records);
        debug!(
            employees = groups.len(),
            evaluated_at = %evaluated_at,
            "resolving shift windows"
        );

        let resolutions = groups
            .into_values()
            .map(|group| aggregate(resolve_windows(&group, evaluated_at, &self.config.windows)))
            .collect();

        Ok(PipelineOutcome {
            resolutions,
            evaluated_at,
            attempts: report.attempts,
            low_confidence: !report.roster_applied || !report.met_floor,
        })
    }
}
