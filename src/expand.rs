//! Dictionary-backed key expansion.
//!
//! A dictionary maps a phrase (typically a name written in a non-Latin
//! script) to the spellings a user may type for it:
//!
//! ```json
//! { "你好": ["nihao", "nh"], "音乐": ["yinyue", "yy"] }
//! ```
//!
//! Expanding `"nh"` yields the escaped phrase `你好`, which the matcher then
//! looks up in the catalog like any other key.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use fanout_api::{ExpandError, KeyExpander};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct DictionaryExpander {
	/// `(spelling, phrase)` pairs, spellings lower-cased and sorted.
	spellings: Vec<(String, String)>,
}

impl DictionaryExpander {
	pub fn from_entries<P, S, I>(entries: impl IntoIterator<Item = (P, I)>) -> Self
	where
		P: Into<String>,
		S: AsRef<str>,
		I: IntoIterator<Item = S>,
	{
		let mut spellings = Vec::new();
		for (phrase, variants) in entries {
			let phrase = phrase.into();
			if phrase.is_empty() {
				continue;
			}
			for spelling in variants {
				let spelling = spelling.as_ref().trim().to_lowercase();
				if !spelling.is_empty() {
					spellings.push((spelling, phrase.clone()));
				}
			}
		}
		spellings.sort();
		spellings.dedup();
		Self { spellings }
	}

	/// Parse a dictionary from its JSON form. `origin` names the source in
	/// errors.
	pub fn from_json_str(json: &str, origin: &Path) -> Result<Self, ExpandError> {
		let entries: BTreeMap<String, Vec<String>> =
			serde_json::from_str(json).map_err(|err| ExpandError::Parse {
				path: origin.to_path_buf(),
				reason: err.to_string(),
			})?;
		Ok(Self::from_entries(entries))
	}

	pub fn load(path: &Path) -> Result<Self, ExpandError> {
		let json = fs::read_to_string(path).map_err(|source| ExpandError::Load {
			path: path.to_path_buf(),
			source,
		})?;
		let dictionary = Self::from_json_str(&json, path)?;
		debug!(path = %path.display(), spellings = dictionary.len(), "loaded expansion dictionary");
		Ok(dictionary)
	}

	/// Number of distinct `(spelling, phrase)` pairs.
	#[must_use]
	pub fn len(&self) -> usize {
		self.spellings.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.spellings.is_empty()
	}
}

impl KeyExpander for DictionaryExpander {
	fn is_usable(&self) -> bool {
		!self.is_empty()
	}

	/// `key` arrives pattern-escaped; it is unescaped before the spelling
	/// lookup so spellings containing metacharacters stay reachable.
	fn expand(&self, key: &str) -> Result<Vec<String>, ExpandError> {
		let key = unescape(key.trim()).to_lowercase();
		if key.is_empty() {
			return Ok(Vec::new());
		}

		let start = self.spellings.partition_point(|(spelling, _)| spelling.as_str() < key.as_str());
		let phrases: BTreeSet<String> = self.spellings[start..]
			.iter()
			.take_while(|(spelling, _)| spelling.starts_with(&key))
			.map(|(_, phrase)| regex::escape(phrase))
			.collect();
		Ok(phrases.into_iter().collect())
	}
}

/// Undo `regex::escape`: a backslash makes the following character literal.
fn unescape(key: &str) -> String {
	let mut plain = String::with_capacity(key.len());
	let mut chars = key.chars();
	while let Some(c) = chars.next() {
		match c {
			'\\' => plain.extend(chars.next()),
			other => plain.push(other),
		}
	}
	plain
}
