//! The injectable clock.
//!
//! The shift window resolver interprets punches relative to "now", so the
//! evaluation instant is supplied through this trait rather than read from
//! the system inline. Tests pin it to a fixed instant.

use chrono::NaiveDateTime;

/// Supplies the evaluation instant for a resolution run.
pub trait Clock {
    /// Returns the current instant in device-local time.
    fn now(&self) -> NaiveDateTime;
}

/// The production clock, backed by the local system time.
///
/// Punch timestamps are device-local, so "now" is taken in local time as
/// well; all day arithmetic in the resolver works on matching naive values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
