//! Logger
//!
//! Logs to `stderr`, filtered by `RUST_LOG`, and optionally
//! to a file, filtered by `RUST_LOG_FILE`.
//!
//! Standard output is never written to, since it's reserved
//! for the program's actual output.

// Imports
use {
	std::{fs, io, path::Path, sync::Mutex},
	tracing::Level,
	tracing_subscriber::{prelude::*, EnvFilter},
};

/// Default filter for `stderr`
const DEFAULT_STDERR_FILTER: &str = "info";

/// Default filter for the log file
const DEFAULT_FILE_FILTER: &str = "debug";

/// Initializes the logger.
///
/// Any messages logged through [`pre_init`] are emitted right after.
///
/// # Panics
/// Panics if called more than once.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	// Create the `stderr` layer
	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", DEFAULT_STDERR_FILTER));

	// Then the file layer, if we have a log file
	let file_layer = log_file.and_then(|log_file| {
		let file = fs::OpenOptions::new()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(log_file);

		match file {
			Ok(file) => Some(
				tracing_subscriber::fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(self::env_filter("RUST_LOG_FILE", DEFAULT_FILE_FILTER)),
			),
			Err(err) => {
				pre_init::warn(format!("Unable to create log file {log_file:?}: {err}"));
				None
			},
		}
	});

	tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();

	// Finally emit everything logged before we were initialized
	for (level, msg) in pre_init::take() {
		match level {
			Level::ERROR => tracing::error!("{msg}"),
			Level::WARN => tracing::warn!("{msg}"),
			Level::INFO => tracing::info!("{msg}"),
			Level::DEBUG => tracing::debug!("{msg}"),
			Level::TRACE => tracing::trace!("{msg}"),
		}
	}
}

/// Creates an env filter from `var`, falling back to `default`
fn env_filter(var: &str, default: &str) -> EnvFilter {
	EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logging before the logger is initialized.
///
/// Messages are buffered until [`init`](super::init) is called.
pub mod pre_init {
	// Imports
	use {std::sync::Mutex, tracing::Level};

	/// Buffered messages
	static MESSAGES: Mutex<Vec<(Level, String)>> = Mutex::new(vec![]);

	/// Buffers a message with level `level`
	fn push(level: Level, msg: String) {
		// Note: A poisoned lock only means another thread panicked while pushing,
		//       the buffer itself is still fine to use.
		MESSAGES.lock().unwrap_or_else(|err| err.into_inner()).push((level, msg));
	}

	/// Buffers a debug message
	pub fn debug(msg: impl Into<String>) {
		self::push(Level::DEBUG, msg.into());
	}

	/// Buffers a warning
	pub fn warn(msg: impl Into<String>) {
		self::push(Level::WARN, msg.into());
	}

	/// Takes all buffered messages
	pub(super) fn take() -> Vec<(Level, String)> {
		std::mem::take(&mut *MESSAGES.lock().unwrap_or_else(|err| err.into_inner()))
	}

	#[cfg(test)]
	mod tests {
		use super::*;

		#[test]
		fn take_drains_in_order() {
			super::debug("first");
			super::warn(String::from("second"));

			let messages = super::take();
			let first = messages.iter().position(|(_, msg)| msg == "first");
			let second = messages.iter().position(|(_, msg)| msg == "second");
			assert!(matches!((first, second), (Some(first), Some(second)) if first < second));
			assert!(messages.iter().any(|(level, msg)| *level == Level::WARN && msg == "second"));

			assert!(!super::take().iter().any(|(_, msg)| msg == "first" || msg == "second"));
		}
	}
}
