//! Extracts metrics from `dramsim3` simulation logs

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	clap::Parser,
	dramstats::{driver, Config},
	dramstats_util::logger,
	std::{fs, io},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Read the config file
	let mut config = match &args.config_file {
		Some(config_file) => {
			let config_file = fs::File::open(config_file).context("Unable to open config file")?;
			serde_json::from_reader::<_, Config>(config_file).context("Unable to parse config file")?
		},
		None => Config::default(),
	};
	if args.all_policies {
		config.enable_all_reports();
	}
	tracing::trace!(?config, "Config");

	// Run all reports
	let report = {
		let mut stdout = io::stdout().lock();
		driver::run(&config, &args.root, &mut stdout).context("Unable to run reports")?
	};

	if let Some(output_path) = &args.output_file {
		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		serde_json::to_writer(output_file, &report).context("Unable to write to output file")?;
	}

	Ok(())
}
