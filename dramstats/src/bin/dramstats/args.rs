//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Config file
	///
	/// Uses the default benchmarks, policies and reports if unspecified.
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,

	/// Directory containing all of the `dramsim3` output directories
	#[clap(long = "root", default_value = ".")]
	pub root: PathBuf,

	/// Enables the reports that are disabled by default
	#[clap(long = "all-policies")]
	pub all_policies: bool,

	/// Output file
	///
	/// Writes all results as json.
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,
}
