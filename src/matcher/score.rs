use fanout_api::ItemInfo;
use regex::Regex;

pub const EXACT_NAME: u32 = 400_000;
pub const NAME_PREFIX: u32 = 300_000;
pub const NAME_WORD_PREFIX: u32 = 250_000;
pub const NAME_CONTAINS: u32 = 200_000;
pub const EN_NAME_PREFIX: u32 = 180_000;
pub const EN_NAME_CONTAINS: u32 = 150_000;
pub const KEYWORD: u32 = 100_000;
pub const GENERIC_NAME: u32 = 80_000;
pub const EXEC: u32 = 60_000;
pub const DESCRIPTION: u32 = 20_000;

/// Score of the best field of `item` that `pattern` hits, or `None` when no
/// field matches.
#[must_use]
pub fn score_item(pattern: &Regex, item: &ItemInfo) -> Option<u32> {
	let field = |value: &Option<String>, score: u32| {
		value
			.as_deref()
			.is_some_and(|text| pattern.is_match(text))
			.then_some(score)
	};

	[
		name_score(pattern, &item.name),
		item.en_name.as_deref().and_then(|en| en_name_score(pattern, en)),
		item.keywords
			.iter()
			.any(|keyword| pattern.is_match(keyword))
			.then_some(KEYWORD),
		field(&item.generic_name, GENERIC_NAME),
		field(&item.exec, EXEC),
		field(&item.description, DESCRIPTION),
	]
	.into_iter()
	.flatten()
	.max()
}

fn name_score(pattern: &Regex, name: &str) -> Option<u32> {
	let first = pattern.find(name)?;
	if first.start() == 0 {
		return Some(if first.end() == name.len() { EXACT_NAME } else { NAME_PREFIX });
	}
	if pattern.find_iter(name).any(|m| starts_word(name, m.start())) {
		return Some(NAME_WORD_PREFIX);
	}
	Some(NAME_CONTAINS)
}

fn en_name_score(pattern: &Regex, en_name: &str) -> Option<u32> {
	let first = pattern.find(en_name)?;
	Some(if first.start() == 0 { EN_NAME_PREFIX } else { EN_NAME_CONTAINS })
}

fn starts_word(text: &str, at: usize) -> bool {
	text[..at]
		.chars()
		.next_back()
		.is_none_or(|prev| !prev.is_alphanumeric())
}
