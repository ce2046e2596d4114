//! Output data

// Imports
use crate::metrics::{Metric, MetricValue};

/// Output data
#[derive(PartialEq, Clone, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Report {
	/// All entries, in output order
	pub entries: Vec<ReportEntry>,
}

/// Report entry
#[derive(PartialEq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ReportEntry {
	pub metric:        Metric,
	pub benchmark_idx: usize,
	pub benchmark:     String,
	pub policy:        String,
	pub value:         MetricValue,
}
