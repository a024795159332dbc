use anyhow::{Context, Error, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use fanout::app_dirs;
use fanout::matcher::DEFAULT_MIN_PARTITION;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod sections;

use sections::{CatalogSection, ExpanderSection, MatcherSection, SearchSection};

const DEFAULT_CATALOG_FILE: &str = "catalog.json";
const DEFAULT_DICTIONARY_FILE: &str = "dictionary.json";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    search: SearchSection,
    matcher: MatcherSection,
    catalog: CatalogSection,
    expander: ExpanderSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.search.apply_cli_overrides(cli);
        self.matcher.apply_cli_overrides(cli);
        self.catalog.apply_cli_overrides(cli);
        self.expander.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            timeout_ms: detect_source(
                cli.timeout_ms.is_some(),
                self.search.timeout_ms.is_some(),
                "FANOUT__SEARCH__TIMEOUT_MS",
                "--timeout-ms",
                "search.timeout_ms",
            ),
            limit: detect_source(
                cli.limit.is_some(),
                self.search.limit.is_some(),
                "FANOUT__SEARCH__LIMIT",
                "--limit",
                "search.limit",
            ),
            min_partition: detect_source(
                cli.min_partition.is_some(),
                self.matcher.min_partition.is_some(),
                "FANOUT__MATCHER__MIN_PARTITION",
                "--min-partition",
                "matcher.min_partition",
            ),
        };

        let catalog = match self.catalog.path {
            Some(path) => path,
            None => app_dirs::get_data_dir()
                .context("failed to locate the default catalog")?
                .join(DEFAULT_CATALOG_FILE),
        };

        let config = ResolvedConfig {
            catalog,
            dictionary: self.expander.resolve(default_dictionary),
            max_parallelism: normalize_parallelism(self.search.max_parallelism),
            min_partition: self.matcher.min_partition.unwrap_or(DEFAULT_MIN_PARTITION),
            timeout: self.search.timeout_ms.map(Duration::from_millis),
            limit: self.search.limit,
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

/// Map the signed configuration value onto the search's parallelism bound.
/// Zero, negative and absent values all select the built-in default.
fn normalize_parallelism(value: Option<i64>) -> usize {
    value.map_or(0, |value| usize::try_from(value).unwrap_or(0))
}

fn default_dictionary() -> Option<PathBuf> {
    let path = app_dirs::get_data_dir().ok()?.join(DEFAULT_DICTIONARY_FILE);
    path.is_file().then_some(path)
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
