//! Report lines

// Imports
use {
	crate::metrics::{Metric, MetricValue},
	std::fmt,
};

/// Report line.
///
/// Displays as `<Label> (<benchmark-idx>, <policy>): <value>`.
#[derive(Clone, Copy, Debug)]
pub struct ReportLine<'a> {
	/// Benchmark index
	pub benchmark_idx: usize,

	/// Policy label
	pub policy: &'a str,

	/// Value
	pub value: &'a MetricValue,
}

impl fmt::Display for ReportLine<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = self::label(self.value.metric());
		write!(f, "{label} ({}, {}): ", self.benchmark_idx, self.policy)?;

		match self.value {
			MetricValue::Bandwidth(bandwidth) => write!(f, "{:.5}", bandwidth.gib_per_sec()),
			MetricValue::Latency(latency) => write!(f, "{:.0}", latency.mean),
			MetricValue::RowHits(hits) => write!(f, "{}", hits.total),
			MetricValue::Power(power) => write!(
				f,
				"{:.3} --> Efficiency (nW/cycle): {:.8}",
				power.power_sum,
				power.efficiency_nw_per_cycle()
			),
			MetricValue::IdleCycles(idle) => write!(f, "{}", idle.total),
		}
	}
}

/// Returns the label of `metric`
pub fn label(metric: Metric) -> &'static str {
	match metric {
		Metric::Bandwidth => "Bandwidth",
		Metric::Latency => "Latency",
		Metric::Hits => "Hits",
		Metric::Power => "Power",
		Metric::Idle => "Cycles",
	}
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::metrics::{Bandwidth, IdleCycles, Latency, Power, RowHits},
	};

	fn line(benchmark_idx: usize, policy: &str, value: MetricValue) -> String {
		ReportLine {
			benchmark_idx,
			policy,
			value: &value,
		}
		.to_string()
	}

	#[test]
	fn bandwidth() {
		let value = MetricValue::Bandwidth(Bandwidth {
			sum_bytes_per_ns: 5.0,
			matches:          2,
		});
		assert_eq!(self::line(0, "Interleaved", value), "Bandwidth (0, Interleaved): 4.65661");
	}

	#[test]
	fn latency_rounds() {
		let value = MetricValue::Latency(Latency {
			mean:    20.4,
			samples: 3,
		});
		assert_eq!(self::line(2, "Interleaved", value), "Latency (2, Interleaved): 20");
	}

	#[test]
	fn hits() {
		let value = MetricValue::RowHits(RowHits {
			total:   15,
			matches: 3,
		});
		assert_eq!(self::line(1, "Interleaved", value), "Hits (1, Interleaved): 15");
	}

	#[test]
	fn power_with_efficiency() {
		let value = MetricValue::Power(Power {
			power_sum: 3.0,
			cycles:    1000.0,
		});
		assert_eq!(
			self::line(0, "Closed", value),
			"Power (0, Closed): 3.000 --> Efficiency (nW/cycle): 3000.00000000"
		);
	}

	#[test]
	fn idle_is_labeled_cycles() {
		let value = MetricValue::IdleCycles(IdleCycles {
			total:   303,
			matches: 3,
		});
		assert_eq!(self::line(2, "Open", value), "Cycles (2, Open): 303");
	}
}
