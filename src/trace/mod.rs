//! Trace comparison.
//!
//! Reads golden and replay traces from header-less CSV and scores their
//! agreement as a mean absolute percentage error.

pub mod compare;

pub use compare::{compare_traces, read_trace};
