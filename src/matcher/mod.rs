//! Default matcher: compiles each key as a case-insensitive regular expression
//! and scores catalog entries by the best field it hits.

mod score;

use std::thread;

use fanout_api::{ItemInfo, KeyMatcher, MatchContext, MatchError, MatcherFactory, SearchResult};
use regex::{Regex, RegexBuilder};
use tracing::debug;

pub use score::score_item;

/// Smallest slice of the catalog worth its own thread.
pub const DEFAULT_MIN_PARTITION: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct RegexMatcherFactory {
	min_partition: usize,
}

impl RegexMatcherFactory {
	#[must_use]
	pub fn new(min_partition: usize) -> Self {
		Self {
			min_partition: min_partition.max(1),
		}
	}
}

impl Default for RegexMatcherFactory {
	fn default() -> Self {
		Self::new(DEFAULT_MIN_PARTITION)
	}
}

impl MatcherFactory<ItemInfo> for RegexMatcherFactory {
	type Matcher = RegexMatcher;

	fn create(&self, ctx: MatchContext) -> Result<Self::Matcher, MatchError> {
		Ok(RegexMatcher {
			ctx,
			min_partition: self.min_partition,
		})
	}
}

pub struct RegexMatcher {
	ctx: MatchContext,
	min_partition: usize,
}

impl KeyMatcher<ItemInfo> for RegexMatcher {
	fn run_once(&mut self, key: &str, dataset: &[ItemInfo]) -> Result<(), MatchError> {
		let pattern = RegexBuilder::new(key)
			.case_insensitive(true)
			.build()
			.map_err(|source| MatchError::Pattern {
				key: key.to_owned(),
				source,
			})?;

		let partitions = partition_count(dataset.len(), self.ctx.max_parallelism, self.min_partition);
		if partitions <= 1 {
			scan(&pattern, dataset, &self.ctx);
			return Ok(());
		}

		let chunk_len = dataset.len().div_ceil(partitions);
		let pattern = &pattern;
		let ctx = &self.ctx;
		thread::scope(|scope| {
			for part in dataset.chunks(chunk_len) {
				scope.spawn(move || scan(pattern, part, ctx));
			}
		});
		Ok(())
	}
}

/// Number of slices `len` items are split into: never more than
/// `max_parallelism`, never smaller than `min_partition` items each.
fn partition_count(len: usize, max_parallelism: usize, min_partition: usize) -> usize {
	if len == 0 {
		return 0;
	}
	(len / min_partition.max(1)).clamp(1, max_parallelism.max(1))
}

fn scan(pattern: &Regex, items: &[ItemInfo], ctx: &MatchContext) {
	for item in items {
		if ctx.should_stop() {
			return;
		}
		let Some(score) = score_item(pattern, item) else {
			continue;
		};
		if !ctx.emit(SearchResult::new(item.id.clone(), item.name.clone(), score)) {
			debug!(pattern = pattern.as_str(), "result consumer gone; stopping scan");
			return;
		}
	}
}
