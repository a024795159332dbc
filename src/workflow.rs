use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{RecvTimeoutError, Sender};
use fanout::catalog::load_catalog;
use fanout::expand::DictionaryExpander;
use fanout::matcher::RegexMatcherFactory;
use fanout::search::{SearchSummary, Transaction};
use fanout::{CancelToken, ItemInfo, KeyExpander, ResultList};
use fanout_stream::sink;
use tracing::{info, warn};

use crate::settings::ResolvedConfig;

/// What the binary prints.
#[derive(Debug)]
pub(crate) struct SearchOutcome {
	pub(crate) query: String,
	pub(crate) results: ResultList,
	pub(crate) summary: SearchSummary,
}

/// One command-line search: the loaded catalog, the optional expander and the
/// knobs from the resolved configuration.
pub(crate) struct SearchWorkflow {
	catalog: Vec<ItemInfo>,
	expander: Option<Arc<dyn KeyExpander>>,
	max_parallelism: usize,
	min_partition: usize,
	timeout: Option<Duration>,
	limit: Option<usize>,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let catalog = load_catalog(&config.catalog)?;
		let expander = match &config.dictionary {
			Some(path) => {
				let dictionary = DictionaryExpander::load(path)
					.with_context(|| format!("failed to load dictionary {}", path.display()))?;
				if dictionary.is_empty() {
					warn!(path = %path.display(), "dictionary is empty; expansion disabled");
				}
				Some(Arc::new(dictionary) as Arc<dyn KeyExpander>)
			}
			None => None,
		};

		Ok(Self {
			catalog,
			expander,
			max_parallelism: config.max_parallelism,
			min_partition: config.min_partition,
			timeout: config.timeout,
			limit: config.limit,
		})
	}

	pub(crate) fn run(self, query: &str) -> Result<SearchOutcome> {
		let (tx, rx) = sink::unbounded();
		let transaction = Transaction::builder()
			.sink(tx)
			.maybe_expander(self.expander)
			.max_parallelism(self.max_parallelism)
			.build(RegexMatcherFactory::new(self.min_partition))?;

		let deadline = self
			.timeout
			.map(|timeout| Deadline::arm(timeout, transaction.cancel_token()));
		let summary = transaction.search(query, &self.catalog);
		if let Some(deadline) = deadline {
			deadline.disarm();
		}
		drop(transaction);

		let mut results = ResultList::collect_from(&rx);
		match self.limit {
			Some(limit) => results.sort_and_truncate(limit),
			None => results.sort(),
		}

		Ok(SearchOutcome {
			query: query.to_owned(),
			results,
			summary,
		})
	}
}

/// Timer thread that cancels a search once its timeout elapses.
struct Deadline {
	done: Sender<()>,
	handle: JoinHandle<()>,
}

impl Deadline {
	fn arm(timeout: Duration, cancel: CancelToken) -> Self {
		let (done, finished) = crossbeam_channel::bounded::<()>(0);
		let handle = thread::spawn(move || {
			if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(timeout)
				&& cancel.try_cancel()
			{
				info!(timeout_ms = timeout.as_millis() as u64, "search timed out");
			}
		});
		Self { done, handle }
	}

	/// Stop the timer without cancelling and wait for its thread.
	fn disarm(self) {
		drop(self.done);
		if self.handle.join().is_err() {
			warn!("deadline thread panicked");
		}
	}
}
