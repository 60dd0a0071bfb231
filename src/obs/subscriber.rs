// crates.io
use tracing_subscriber::EnvFilter;
// self
use crate::config::LogFormat;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global `tracing` subscriber in the requested format.
///
/// The filter comes from `RUST_LOG` and falls back to [`DEFAULT_LOG_FILTER`]. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
pub fn init_subscriber(format: LogFormat) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
	let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
	let _ = match format {
		LogFormat::Compact => builder.compact().try_init(),
		LogFormat::Pretty => builder.pretty().try_init(),
		LogFormat::Json => builder.json().try_init(),
	};
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn repeated_initialization_is_harmless() {
		init_subscriber(LogFormat::Compact);
		init_subscriber(LogFormat::Json);
	}
}
