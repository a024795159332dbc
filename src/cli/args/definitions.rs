use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `fanout` binary.
#[derive(Parser, Debug)]
#[command(
    name = "fanout",
    version,
    long_version = long_version(),
    about = "Search a launcher catalog with the query and its expanded spellings",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(value_name = "QUERY", help = "Text to search for (default: empty, matches everything)")]
    pub(crate) query: Option<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "FANOUT_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON catalog of items to search (default: catalog.json in the data directory)"
    )]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(
        short = 'd',
        long,
        value_name = "FILE",
        help = "JSON dictionary of alternate spellings (default: dictionary.json in the data directory, if present)"
    )]
    pub(crate) dictionary: Option<PathBuf>,
    #[arg(
        short = 'E',
        long = "no-expand",
        help = "Search the query only, without dictionary expansion (default: disabled)"
    )]
    pub(crate) no_expand: bool,
    #[arg(
        short = 'j',
        long,
        value_name = "NUM",
        allow_negative_numbers = true,
        help = "Upper bound on each matcher's threads; zero or less uses the default (default: 20)"
    )]
    pub(crate) parallelism: Option<i64>,
    #[arg(
        long = "min-partition",
        value_name = "NUM",
        help = "Fewest catalog items a matcher thread is given (default: 64)"
    )]
    pub(crate) min_partition: Option<usize>,
    #[arg(
        short = 't',
        long = "timeout-ms",
        value_name = "MS",
        help = "Cancel the search after this many milliseconds (default: no timeout)"
    )]
    pub(crate) timeout_ms: Option<u64>,
    #[arg(
        short = 'l',
        long,
        value_name = "NUM",
        help = "Print at most this many results (default: all)"
    )]
    pub(crate) limit: Option<usize>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the results"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity; repeat for more (overridden by FANOUT_LOG)"
    )]
    pub(crate) verbose: u8,
}
