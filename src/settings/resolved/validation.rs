use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if let Some(timeout) = config.timeout
		&& timeout.is_zero()
	{
		return Err(ConfigError::invalid(
			"search.timeout_ms",
			"0",
			sources.source_for_timeout(),
			"must be greater than zero",
		));
	}

	if let Some(limit) = config.limit
		&& limit == 0
	{
		return Err(ConfigError::invalid(
			"search.limit",
			limit.to_string(),
			sources.source_for_limit(),
			"must be at least 1",
		));
	}

	if config.min_partition == 0 {
		return Err(ConfigError::invalid(
			"matcher.min_partition",
			"0",
			sources.source_for_min_partition(),
			"must be at least 1",
		));
	}

	Ok(())
}
