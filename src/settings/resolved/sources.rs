use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated setting came from, for error messages.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) timeout_ms: Option<SettingSource>,
	pub(crate) limit: Option<SettingSource>,
	pub(crate) min_partition: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_timeout(&self) -> SettingSource {
		self.timeout_ms
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.timeout_ms"))
	}

	pub(crate) fn source_for_limit(&self) -> SettingSource {
		self.limit
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.limit"))
	}

	pub(crate) fn source_for_min_partition(&self) -> SettingSource {
		self.min_partition
			.clone()
			.unwrap_or(SettingSource::ConfigKey("matcher.min_partition"))
	}
}
