use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	for line in summary_lines(config) {
		println!("{line}");
	}
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
	let mut lines = vec![
		"Effective configuration:".to_string(),
		format!("  Catalog: {}", config.catalog.display()),
	];
	match &config.dictionary {
		Some(path) => lines.push(format!("  Dictionary: {}", path.display())),
		None => lines.push("  Dictionary: (expansion disabled)".to_string()),
	}
	if config.max_parallelism == 0 {
		lines.push("  Max parallelism: (default)".to_string());
	} else {
		lines.push(format!("  Max parallelism: {}", config.max_parallelism));
	}
	lines.push(format!("  Min partition: {}", config.min_partition));
	match config.timeout {
		Some(timeout) => lines.push(format!("  Timeout: {}ms", timeout.as_millis())),
		None => lines.push("  Timeout: none".to_string()),
	}
	match config.limit {
		Some(limit) => lines.push(format!("  Result limit: {limit}")),
		None => lines.push("  Result limit: unlimited".to_string()),
	}
	lines
}
