//! Diagnostic output for the `fanout` binary.
//!
//! Library code only emits `tracing` events; this module installs the
//! subscriber that renders them on stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `fanout=debug`.
pub const LOG_ENV: &str = "FANOUT_LOG";

/// Install the stderr subscriber.
///
/// `FANOUT_LOG` wins when set and valid; otherwise the level follows the
/// number of `-v` flags. Later calls leave the first subscriber in place.
pub fn initialize(verbosity: u8) {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}
