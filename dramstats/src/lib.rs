//! Metric extraction from `dramsim3` simulation logs.
//!
//! Reads one `dramsim3.txt` log per benchmark and scheduling policy,
//! extracts bandwidth, latency, row hits, power and bank idle cycles
//! from each, and reports them one line per benchmark.

// Modules
pub mod config;
pub mod data;
pub mod driver;
pub mod loader;
pub mod metrics;
pub mod report;

// Exports
pub use self::{
	config::Config,
	metrics::{ExtractError, Metric, MetricValue},
};
