//! Attendance Acquisition & Shift Resolution Engine
//!
//! This crate acquires raw biometric punch events from physical clock-in
//! terminals and resolves, per employee, which punches constitute the
//! Check-In and Check-Out of an overnight (midnight-spanning) shift.
//!
//! The pipeline has four stages: a resilient fetcher that pulls a complete
//! punch set from an unreliable device with retry and backoff, an employee
//! grouper, the shift window resolver (the core algorithm), and a status
//! aggregator. A thin HTTP layer in [`api`] formats the result as JSON for
//! downstream automation.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod device;
pub mod error;
pub mod models;
pub mod pipeline;
