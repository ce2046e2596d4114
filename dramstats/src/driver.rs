//! Report driver

// Imports
use {
	crate::{
		config::Config,
		data::{Report, ReportEntry},
		loader,
		report::ReportLine,
	},
	anyhow::Context,
	itertools::Itertools,
	std::{io, path::Path},
};

/// Runs all enabled reports of `config` on the logs under `root`.
///
/// All logs are loaded before any report runs. Each report line is written
/// to `output` as soon as it's produced, and the first error aborts the run.
pub fn run(config: &Config, root: &Path, output: &mut impl io::Write) -> Result<Report, anyhow::Error> {
	config.validate().context("Invalid config")?;

	// Load all logs
	let groups = loader::load_all(config, root).context("Unable to load logs")?;
	tracing::debug!(
		"Loaded {} logs for policies [{}]",
		groups.iter().map(|group| group.logs.len()).sum::<usize>(),
		groups.iter().map(|group| &group.policy).join(", ")
	);

	// Then run every report
	let mut report = Report::default();
	for call in config.reports.iter().filter(|call| call.enabled) {
		// Note: `validate` ensures every report has a policy, and we load a group for each policy
		let Some(group) = groups.iter().find(|group| group.policy == call.policy) else {
			anyhow::bail!("Missing logs for policy {:?}", call.policy);
		};

		for (benchmark_idx, log) in group.logs.iter().enumerate() {
			let value = call
				.metric
				.extract(&log.contents)
				.with_context(|| format!("Unable to extract {:?} from {:?}", call.metric, log.path))?;
			tracing::debug!(
				metric = ?call.metric,
				benchmark = %log.benchmark,
				policy = %group.policy,
				?value,
				"Extracted metric"
			);

			let line = ReportLine {
				benchmark_idx,
				policy: &group.policy,
				value: &value,
			};
			writeln!(output, "{line}").context("Unable to write report line")?;

			report.entries.push(ReportEntry {
				metric: call.metric,
				benchmark_idx,
				benchmark: log.benchmark.clone(),
				policy: group.policy.clone(),
				value,
			});
		}
	}

	Ok(report)
}
