//! External collaborator contracts for the Attendance Engine.
//!
//! The engine never talks to hardware directly. A [`DeviceAdapter`]
//! implementation wraps the proprietary terminal SDK, and a [`Clock`]
//! supplies the evaluation instant so tests can pin it.

mod adapter;
mod clock;

pub use adapter::{DeviceAdapter, DeviceError, EnrolledUser, RawPunch};
pub use clock::{Clock, SystemClock};
