//! Configuration

// Imports
use {
	crate::metrics::Metric,
	std::path::{Path, PathBuf},
};

/// Configuration
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
	/// Benchmarks.
	///
	/// Output lines refer to benchmarks by their index in this list.
	pub benchmarks: Vec<String>,

	/// Policy groups
	pub policies: Vec<PolicyGroup>,

	/// Prefix of each log directory
	pub dir_prefix: String,

	/// Log file name, inside each log directory
	pub log_file_name: String,

	/// Report calls, in output order
	pub reports: Vec<ReportCall>,
}

impl Config {
	/// Returns the log path of `benchmark` under `policy`.
	///
	/// This is `<root>/<dir_prefix><benchmark>_<dir_suffix>/<log_file_name>`.
	pub fn log_path(&self, root: &Path, benchmark: &str, policy: &PolicyGroup) -> PathBuf {
		root.join(format!("{}{benchmark}_{}", self.dir_prefix, policy.dir_suffix))
			.join(&self.log_file_name)
	}

	/// Returns the policy group with label `label`
	pub fn policy(&self, label: &str) -> Option<&PolicyGroup> {
		self.policies.iter().find(|policy| policy.label == label)
	}

	/// Enables all report calls
	pub fn enable_all_reports(&mut self) {
		for report in &mut self.reports {
			report.enabled = true;
		}
	}

	/// Checks that all report calls refer to a known policy
	pub fn validate(&self) -> Result<(), anyhow::Error> {
		for report in &self.reports {
			anyhow::ensure!(
				self.policy(&report.policy).is_some(),
				"Report {:?} refers to unknown policy {:?}",
				report.metric,
				report.policy
			);
		}

		Ok(())
	}
}

impl Default for Config {
	fn default() -> Self {
		let policies = vec![
			PolicyGroup::new("Closed", "closed"),
			PolicyGroup::new("Open", "open"),
			PolicyGroup::new("Interleaved", "open_interleaved"),
		];

		// Note: Bandwidth, latency and hits are only reported for the
		//       interleaved policy by default.
		let reports = [Metric::Bandwidth, Metric::Latency, Metric::Hits]
			.into_iter()
			.flat_map(|metric| {
				[
					ReportCall::new(metric, "Closed", false),
					ReportCall::new(metric, "Open", false),
					ReportCall::new(metric, "Interleaved", true),
				]
			})
			.chain([Metric::Power, Metric::Idle].into_iter().flat_map(|metric| {
				policies
					.iter()
					.map(move |policy| ReportCall::new(metric, &policy.label, true))
					.collect::<Vec<_>>()
			}))
			.collect();

		Self {
			benchmarks: ["RADIX", "FFT", "LU"].map(String::from).to_vec(),
			policies,
			dir_prefix: "out_".to_owned(),
			log_file_name: "dramsim3.txt".to_owned(),
			reports,
		}
	}
}

/// Policy group
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PolicyGroup {
	/// Label, used for output only
	pub label: String,

	/// Log directory suffix
	pub dir_suffix: String,
}

impl PolicyGroup {
	/// Creates a new policy group
	pub fn new(label: &str, dir_suffix: &str) -> Self {
		Self {
			label:      label.to_owned(),
			dir_suffix: dir_suffix.to_owned(),
		}
	}
}

/// Report call
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ReportCall {
	/// Metric to report
	pub metric: Metric,

	/// Policy label of the logs to report on
	pub policy: String,

	/// Whether this report is enabled
	#[serde(default = "default_enabled")]
	pub enabled: bool,
}

impl ReportCall {
	/// Creates a new report call
	pub fn new(metric: Metric, policy: &str, enabled: bool) -> Self {
		Self {
			metric,
			policy: policy.to_owned(),
			enabled,
		}
	}
}

fn default_enabled() -> bool {
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_log_paths() {
		let config = Config::default();
		let interleaved = config.policy("Interleaved").expect("Missing interleaved policy");

		assert_eq!(
			config.log_path(Path::new("."), "RADIX", interleaved),
			Path::new("./out_RADIX_open_interleaved/dramsim3.txt")
		);
	}

	#[test]
	fn default_reports_order() {
		let config = Config::default();
		let enabled = config
			.reports
			.iter()
			.filter(|report| report.enabled)
			.map(|report| (report.metric, report.policy.as_str()))
			.collect::<Vec<_>>();

		assert_eq!(enabled, [
			(Metric::Bandwidth, "Interleaved"),
			(Metric::Latency, "Interleaved"),
			(Metric::Hits, "Interleaved"),
			(Metric::Power, "Closed"),
			(Metric::Power, "Open"),
			(Metric::Power, "Interleaved"),
			(Metric::Idle, "Closed"),
			(Metric::Idle, "Open"),
			(Metric::Idle, "Interleaved"),
		]);
		assert_eq!(config.reports.len(), 15);
	}

	#[test]
	fn enable_all() {
		let mut config = Config::default();
		config.enable_all_reports();
		assert!(config.reports.iter().all(|report| report.enabled));
	}

	#[test]
	fn partial_json_uses_defaults() {
		let config = serde_json::from_str::<Config>(
			r#"{
				"benchmarks": ["FFT"],
				"reports": [{ "metric": "latency", "policy": "Open" }]
			}"#,
		)
		.expect("Unable to parse config");

		assert_eq!(config.benchmarks, ["FFT"]);
		assert_eq!(config.log_file_name, "dramsim3.txt");
		assert_eq!(config.policies.len(), 3);
		assert!(config.reports[0].enabled);
		config.validate().expect("Config should be valid");
	}

	#[test]
	fn unknown_policy_is_rejected() {
		let mut config = Config::default();
		config.reports.push(ReportCall::new(Metric::Power, "Adaptive", true));
		assert!(config.validate().is_err());
	}
}
