use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
    /// Signed so that `-1` and friends can be written to request the default.
    pub(super) max_parallelism: Option<i64>,
    pub(super) timeout_ms: Option<u64>,
    pub(super) limit: Option<usize>,
}

impl SearchSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.parallelism {
            self.max_parallelism = Some(value);
        }
        if let Some(value) = cli.timeout_ms {
            self.timeout_ms = Some(value);
        }
        if let Some(value) = cli.limit {
            self.limit = Some(value);
        }
    }
}

/// `[matcher]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct MatcherSection {
    pub(super) min_partition: Option<usize>,
}

impl MatcherSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.min_partition {
            self.min_partition = Some(value);
        }
    }
}

/// `[catalog]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct CatalogSection {
    pub(super) path: Option<PathBuf>,
}

impl CatalogSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.catalog.clone() {
            self.path = Some(path);
        }
    }
}

/// `[expander]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ExpanderSection {
    pub(super) enabled: Option<bool>,
    pub(super) dictionary: Option<PathBuf>,
}

impl ExpanderSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if cli.no_expand {
            self.enabled = Some(false);
        }
        if let Some(path) = cli.dictionary.clone() {
            self.dictionary = Some(path);
        }
    }

    /// Dictionary to load, if expansion is enabled and one is configured or
    /// found by `fallback`.
    pub(super) fn resolve(self, fallback: impl FnOnce() -> Option<PathBuf>) -> Option<PathBuf> {
        if self.enabled == Some(false) {
            return None;
        }
        self.dictionary.or_else(fallback)
    }
}
