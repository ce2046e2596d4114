//! Log loading

// Imports
use {
	crate::config::{Config, PolicyGroup},
	anyhow::Context,
	std::{
		fs,
		path::{Path, PathBuf},
	},
};

/// Logs of all benchmarks under a single policy
#[derive(Clone, Debug)]
pub struct LogGroup {
	/// Policy label
	pub policy: String,

	/// Logs, in the same order as the configured benchmarks
	pub logs: Vec<Log>,
}

/// Log of a single benchmark
#[derive(Clone, Debug)]
pub struct Log {
	/// Benchmark
	pub benchmark: String,

	/// Path the log was read from
	pub path: PathBuf,

	/// Contents
	pub contents: String,
}

/// Loads the logs of every benchmark under `policy`
pub fn load_group(config: &Config, root: &Path, policy: &PolicyGroup) -> Result<LogGroup, anyhow::Error> {
	let logs = config
		.benchmarks
		.iter()
		.map(|benchmark| {
			let path = config.log_path(root, benchmark, policy);
			let contents = fs::read_to_string(&path).with_context(|| format!("Unable to read log file {path:?}"))?;
			tracing::debug!(?path, len = contents.len(), "Loaded log");

			Ok(Log {
				benchmark: benchmark.clone(),
				path,
				contents,
			})
		})
		.collect::<Result<_, anyhow::Error>>()?;

	Ok(LogGroup {
		policy: policy.label.clone(),
		logs,
	})
}

/// Loads the logs of every policy group, in order
pub fn load_all(config: &Config, root: &Path) -> Result<Vec<LogGroup>, anyhow::Error> {
	config
		.policies
		.iter()
		.map(|policy| {
			self::load_group(config, root, policy)
				.with_context(|| format!("Unable to load logs for policy {:?}", policy.label))
		})
		.collect()
}
