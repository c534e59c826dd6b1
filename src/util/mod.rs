//! Shared utilities.
//!
//! Frame pacing for drivers that run an engine in real time.

/// Smoothed update rate and optional pacing.
pub mod frame_timing;
