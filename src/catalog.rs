//! On-disk catalog of launchable items.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fanout_api::ItemInfo;
use tracing::debug;

/// Read a JSON array of [`ItemInfo`] records.
pub fn load_catalog(path: &Path) -> Result<Vec<ItemInfo>> {
	let json = fs::read_to_string(path)
		.with_context(|| format!("failed to read catalog {}", path.display()))?;
	let items: Vec<ItemInfo> = serde_json::from_str(&json)
		.with_context(|| format!("failed to parse catalog {}", path.display()))?;
	debug!(path = %path.display(), items = items.len(), "loaded catalog");
	Ok(items)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn reads_items_with_optional_fields() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("catalog.json");
		fs::write(
			&path,
			r#"[
				{"id": "chrome", "name": "Google Chrome", "keywords": ["browser"]},
				{"id": "music", "name": "深度音乐", "en_name": "Deepin Music"}
			]"#,
		)
		.unwrap();

		let items = load_catalog(&path).unwrap();
		assert_eq!(items.len(), 2);
		assert_eq!(items[0].keywords, vec!["browser"]);
		assert_eq!(items[1].en_name.as_deref(), Some("Deepin Music"));
	}

	#[test]
	fn errors_name_the_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("catalog.json");
		fs::write(&path, "{").unwrap();

		let err = load_catalog(&path).unwrap_err();
		assert!(format!("{err}").contains("catalog.json"));
	}
}
