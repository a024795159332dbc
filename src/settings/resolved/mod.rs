use std::path::PathBuf;
use std::time::Duration;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
	pub catalog: PathBuf,
	/// Expansion dictionary; `None` disables key expansion.
	pub dictionary: Option<PathBuf>,
	/// Zero selects the search's built-in default.
	pub max_parallelism: usize,
	pub min_partition: usize,
	pub timeout: Option<Duration>,
	pub limit: Option<usize>,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
