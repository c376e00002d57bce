//! Wiring guide aggregation and rendering.

pub mod aggregator;
pub mod generator;

pub use aggregator::Aggregator;
