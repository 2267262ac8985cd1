//! Shared test utilities used across the nullnet crates.
//!
//! [`tracing::RecordingLayer`] captures spans and events so tests can
//! assert on instrumentation, and [`ci::property_test_profile`] reads the
//! environment overrides that tune property-test runs.

pub mod ci;
pub mod tracing;
