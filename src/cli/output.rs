use anyhow::Result;
use serde_json::json;

use crate::workflow::SearchOutcome;

/// Print one line per result, best first.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
	for line in format_plain(outcome) {
		println!("{line}");
	}
	if outcome.summary.cancelled {
		eprintln!("search cancelled (query: '{}'); results may be incomplete", outcome.query);
	}
}

fn format_plain(outcome: &SearchOutcome) -> Vec<String> {
	outcome
		.results
		.iter()
		.map(|result| format!("{}\t{}\t{}", result.score, result.id, result.name))
		.collect()
}

/// Format the search outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
	let payload = json!({
		"query": outcome.query,
		"cancelled": outcome.summary.cancelled,
		"keys": outcome.summary.keys_dispatched,
		"failed_keys": outcome.summary.keys_failed,
		"results": outcome.results,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search outcome.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
