//! Metric extraction from `dramsim3` logs.
//!
//! Each metric is extracted by scanning the whole log for a `key = value`
//! (or `key value`) pattern and reducing all matched values.

// Imports
use {
	average::Mean,
	regex::Regex,
	std::{error, fmt, str::FromStr, sync::LazyLock},
};

/// Metric
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
	/// Average bandwidth
	Bandwidth,

	/// Average request latency
	Latency,

	/// Row hits
	Hits,

	/// Average power
	Power,

	/// All-bank idle cycles
	Idle,
}

impl Metric {
	/// Extracts this metric from `log`
	pub fn extract(self, log: &str) -> Result<MetricValue, ExtractError> {
		let value = match self {
			Self::Bandwidth => MetricValue::Bandwidth(self::bandwidth(log)?),
			Self::Latency => MetricValue::Latency(self::latency(log)?),
			Self::Hits => MetricValue::RowHits(self::row_hits(log)?),
			Self::Power => MetricValue::Power(self::power(log)?),
			Self::Idle => MetricValue::IdleCycles(self::idle_cycles(log)?),
		};

		Ok(value)
	}
}

/// Metric value
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricValue {
	Bandwidth(Bandwidth),
	Latency(Latency),
	RowHits(RowHits),
	Power(Power),
	IdleCycles(IdleCycles),
}

impl MetricValue {
	/// Returns the metric of this value
	pub fn metric(&self) -> Metric {
		match self {
			Self::Bandwidth(_) => Metric::Bandwidth,
			Self::Latency(_) => Metric::Latency,
			Self::RowHits(_) => Metric::Hits,
			Self::Power(_) => Metric::Power,
			Self::IdleCycles(_) => Metric::Idle,
		}
	}
}

/// Bandwidth
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Bandwidth {
	/// Sum of all average bandwidths (bytes / ns)
	pub sum_bytes_per_ns: f64,

	/// Number of matches
	pub matches: usize,
}

impl Bandwidth {
	/// Bytes per GiB
	pub const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;
	/// Nano-seconds per second
	pub const NANOS_PER_SEC: f64 = 1e9;

	/// Returns the bandwidth in GiB / s
	pub fn gib_per_sec(&self) -> f64 {
		self.sum_bytes_per_ns * Self::NANOS_PER_SEC / Self::BYTES_PER_GIB
	}
}

/// Latency
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Latency {
	/// Mean of all average request latencies (cycles)
	pub mean: f64,

	/// Number of samples
	pub samples: usize,
}

/// Row hits
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RowHits {
	/// Total row hits
	pub total: u64,

	/// Number of matches
	pub matches: usize,
}

/// Power
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Power {
	/// Sum of all average powers (mW)
	pub power_sum: f64,

	/// Number of cycles
	pub cycles: f64,
}

impl Power {
	/// Returns the efficiency, in nW / cycle
	pub fn efficiency_nw_per_cycle(&self) -> f64 {
		(self.power_sum / self.cycles) * 1e6
	}
}

/// Idle cycles
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct IdleCycles {
	/// Total idle cycles across all banks
	pub total: u64,

	/// Number of matches
	pub matches: usize,
}

/// Extracts the bandwidth from `log`
pub fn bandwidth(log: &str) -> Result<Bandwidth, ExtractError> {
	let bandwidths = BANDWIDTH.capture_values::<f64>(log, key::BANDWIDTH)?;
	self::warn_if_empty(key::BANDWIDTH, &bandwidths);

	Ok(Bandwidth {
		sum_bytes_per_ns: bandwidths.iter().sum(),
		matches:          bandwidths.len(),
	})
}

/// Extracts the mean latency from `log`.
///
/// Returns `Err` if no latencies exist.
pub fn latency(log: &str) -> Result<Latency, ExtractError> {
	let latencies = LATENCY.capture_values::<f64>(log, key::LATENCY)?;
	if latencies.is_empty() {
		return Err(ExtractError::EmptyAggregate { key: key::LATENCY });
	}

	let mean = latencies.iter().copied().collect::<Mean>();
	Ok(Latency {
		mean:    mean.mean(),
		samples: latencies.len(),
	})
}

/// Extracts the total row hits from `log`
pub fn row_hits(log: &str) -> Result<RowHits, ExtractError> {
	let hits = ROW_HITS.capture_values::<u64>(log, key::ROW_HITS)?;
	self::warn_if_empty(key::ROW_HITS, &hits);

	Ok(RowHits {
		total:   self::checked_sum(key::ROW_HITS, &hits)?,
		matches: hits.len(),
	})
}

/// Extracts the power from `log`.
///
/// Only the first number of cycles is used.
/// Returns `Err` if no number of cycles exist, or if it's zero.
pub fn power(log: &str) -> Result<Power, ExtractError> {
	let powers = POWER.capture_values::<f64>(log, key::POWER)?;
	let cycles = NUM_CYCLES
		.capture_first::<f64>(log, key::NUM_CYCLES)?
		.ok_or(ExtractError::NoMatchFound { key: key::NUM_CYCLES })?;
	if cycles == 0.0 {
		return Err(ExtractError::ZeroCycles);
	}

	Ok(Power {
		power_sum: powers.iter().sum(),
		cycles,
	})
}

/// Extracts the total idle cycles of all banks from `log`
pub fn idle_cycles(log: &str) -> Result<IdleCycles, ExtractError> {
	let idle_cycles = IDLE_CYCLES.capture_values::<u64>(log, key::IDLE_CYCLES)?;
	self::warn_if_empty(key::IDLE_CYCLES, &idle_cycles);

	Ok(IdleCycles {
		total:   self::checked_sum(key::IDLE_CYCLES, &idle_cycles)?,
		matches: idle_cycles.len(),
	})
}

/// Sums all `values` of `key`.
///
/// Returns `Err` if the sum overflows.
fn checked_sum(key: &'static str, values: &[u64]) -> Result<u64, ExtractError> {
	values
		.iter()
		.try_fold(0u64, |sum, &value| sum.checked_add(value))
		.ok_or(ExtractError::Overflow { key })
}

/// Warns if `values` is empty
fn warn_if_empty<T>(key: &str, values: &[T]) {
	if values.is_empty() {
		tracing::warn!("No matches found for {key:?}, reporting zero");
	}
}

/// Keys, as they appear in the log
pub mod key {
	pub const BANDWIDTH: &str = "average_bandwidth";
	pub const LATENCY: &str = "average_request_latency";
	pub const ROW_HITS: &str = "row_hits";
	pub const POWER: &str = "average_power";
	pub const NUM_CYCLES: &str = "num_cycles";
	pub const IDLE_CYCLES: &str = "all_bank_idle_cycles";
}

/// Creates a regex for `prefix` followed by a value.
///
/// The value may be separated from `prefix` by an optional `=` and whitespace,
/// and is always the first capture group.
fn key_value_regex(prefix: &str) -> Regex {
	let pattern = format!(r"{prefix}\s*=?\s*(\d+(?:\.\d+)?)");
	Regex::new(&pattern).unwrap_or_else(|err| panic!("Pattern {pattern:?} was invalid: {err}"))
}

static BANDWIDTH: LazyLock<Regex> = LazyLock::new(|| self::key_value_regex(key::BANDWIDTH));
static LATENCY: LazyLock<Regex> = LazyLock::new(|| self::key_value_regex(key::LATENCY));
static POWER: LazyLock<Regex> = LazyLock::new(|| self::key_value_regex(key::POWER));
static NUM_CYCLES: LazyLock<Regex> = LazyLock::new(|| self::key_value_regex(key::NUM_CYCLES));

// Note: Any `*row_hits` key matches, but only once per line.
static ROW_HITS: LazyLock<Regex> = LazyLock::new(|| self::key_value_regex(".*row_hits"));

// Note: Matches `all_bank_idle_cycles.<bank>`, for any bank.
static IDLE_CYCLES: LazyLock<Regex> = LazyLock::new(|| self::key_value_regex(r"all_bank_idle_cycles.\d+"));

/// Extension trait to parse the values captured by a key-value [`Regex`]
#[extend::ext(name = CaptureValues)]
pub impl Regex {
	/// Parses all values of `key` captured in `haystack`
	fn capture_values<T: FromStr>(&self, haystack: &str, key: &'static str) -> Result<Vec<T>, ExtractError>
	where
		T::Err: fmt::Display,
	{
		let values = self
			.captures_iter(haystack)
			.map(|captures| self::parse_value(key, &captures[1]))
			.collect::<Result<Vec<_>, _>>()?;
		tracing::trace!(key, matches = values.len(), "Captured values");

		Ok(values)
	}

	/// Parses the first value of `key` captured in `haystack`, if any
	fn capture_first<T: FromStr>(&self, haystack: &str, key: &'static str) -> Result<Option<T>, ExtractError>
	where
		T::Err: fmt::Display,
	{
		self.captures(haystack)
			.map(|captures| self::parse_value(key, &captures[1]))
			.transpose()
	}
}

/// Parses a single captured value of `key`
fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ExtractError>
where
	T::Err: fmt::Display,
{
	value.parse().map_err(|err: T::Err| ExtractError::Parse {
		key,
		value: value.to_owned(),
		reason: err.to_string(),
	})
}

/// Extraction error
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ExtractError {
	/// No match found for a required key
	NoMatchFound { key: &'static str },

	/// No values to aggregate
	EmptyAggregate { key: &'static str },

	/// Number of cycles was zero
	ZeroCycles,

	/// Sum of `key`'s values overflowed
	Overflow { key: &'static str },

	/// Unable to parse a value
	Parse {
		key:    &'static str,
		value:  String,
		reason: String,
	},
}

impl fmt::Display for ExtractError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoMatchFound { key } => write!(f, "No match found for {key:?}"),
			Self::EmptyAggregate { key } => write!(f, "Unable to aggregate {key:?}: No values found"),
			Self::ZeroCycles => write!(f, "Number of cycles was zero"),
			Self::Overflow { key } => write!(f, "Sum of {key:?} values overflowed"),
			Self::Parse { key, value, reason } => write!(f, "Unable to parse {key:?} value {value:?}: {reason}"),
		}
	}
}

impl error::Error for ExtractError {}
