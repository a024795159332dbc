use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use fanout_api::{
	CancelToken, KeyExpander, MatchContext, MatcherFactory, SearchError, SearchResult, Sink,
};
use tracing::{debug, info, warn};

use super::keys::{normalize_query, spawn_key_feed};
use super::worker::{WorkerTally, spawn_key_workers};
use super::{DEFAULT_PARALLELISM, KEY_WORKERS};

/// What a finished search did. Purely informational: failures of single keys
/// or of expansion are counted here but never reported as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
	/// Keys pulled from the key feed and handed to a matcher.
	pub keys_dispatched: usize,
	/// Dispatched keys whose matcher returned an error or panicked.
	pub keys_failed: usize,
	/// Whether the cancellation token was set when the search joined.
	pub cancelled: bool,
}

/// A single search request.
///
/// Build one per query with [`Transaction::builder`], run it once with
/// [`Transaction::search`], and drop it. The cancellation token can be cloned
/// out beforehand (or passed in) so another thread can stop the search while
/// it is in flight.
pub struct Transaction<F> {
	factory: F,
	expander: Option<Arc<dyn KeyExpander>>,
	sink: Sink<SearchResult>,
	cancel: CancelToken,
	max_parallelism: usize,
	searched: AtomicBool,
}

impl Transaction<()> {
	/// Start building a transaction; the matcher factory is supplied last, to
	/// [`TransactionBuilder::build`].
	#[must_use]
	pub fn builder() -> TransactionBuilder {
		TransactionBuilder::default()
	}
}

impl<F> Transaction<F> {
	/// Construct a transaction from its collaborators.
	///
	/// `sink` is required; without it there is nowhere to deliver results and
	/// construction fails with [`SearchError::InvalidArgument`]. A
	/// `max_parallelism` of zero selects [`DEFAULT_PARALLELISM`].
	pub fn new(
		expander: Option<Arc<dyn KeyExpander>>,
		sink: Option<Sink<SearchResult>>,
		cancel: CancelToken,
		max_parallelism: usize,
		factory: F,
	) -> Result<Self, SearchError> {
		let sink = sink.ok_or(SearchError::InvalidArgument("result sink is required"))?;
		let max_parallelism = if max_parallelism == 0 {
			DEFAULT_PARALLELISM
		} else {
			max_parallelism
		};

		Ok(Self {
			factory,
			expander,
			sink,
			cancel,
			max_parallelism,
			searched: AtomicBool::new(false),
		})
	}

	/// The parallelism bound passed to every matcher.
	#[must_use]
	pub fn max_parallelism(&self) -> usize {
		self.max_parallelism
	}

	/// A handle on this transaction's cancellation signal.
	#[must_use]
	pub fn cancel_token(&self) -> CancelToken {
		self.cancel.clone()
	}

	/// Stop dispatching further keys. Safe to call any number of times.
	pub fn cancel(&self) {
		if self.cancel.try_cancel() {
			debug!("search cancelled");
		}
	}

	/// Run the search for `query` over `dataset`.
	///
	/// Results are streamed to the sink while this runs. The call blocks until
	/// every key worker has finished or stopped after observing cancellation,
	/// so no work outlives it. A transaction searches once; later calls return
	/// an empty summary without doing anything.
	pub fn search<I>(&self, query: &str, dataset: &[I]) -> SearchSummary
	where
		I: Sync,
		F: MatcherFactory<I>,
	{
		if self.searched.swap(true, Ordering::AcqRel) {
			warn!("transaction already searched, ignoring repeated search");
			return SearchSummary::default();
		}

		let escaped = normalize_query(query);
		let ctx = MatchContext {
			sink: self.sink.clone(),
			cancel: self.cancel.clone(),
			max_parallelism: self.max_parallelism,
		};
		let tally = WorkerTally::default();
		let started = Instant::now();
		debug!(key = %escaped, items = dataset.len(), "starting search");

		thread::scope(|scope| {
			let keys = spawn_key_feed(
				scope,
				self.expander.as_deref(),
				escaped,
				self.cancel.clone(),
			);
			spawn_key_workers(
				scope,
				KEY_WORKERS,
				keys,
				&self.factory,
				&ctx,
				dataset,
				&tally,
			);
		});

		let summary = SearchSummary {
			keys_dispatched: tally.dispatched(),
			keys_failed: tally.failed(),
			cancelled: self.cancel.is_cancelled(),
		};
		info!(
			keys = summary.keys_dispatched,
			failed = summary.keys_failed,
			cancelled = summary.cancelled,
			delivered = self.sink.delivered(),
			elapsed_ms = started.elapsed().as_millis() as u64,
			"search finished"
		);
		summary
	}
}

impl<F> fmt::Debug for Transaction<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Transaction")
			.field("has_expander", &self.expander.is_some())
			.field("cancel", &self.cancel)
			.field("max_parallelism", &self.max_parallelism)
			.finish_non_exhaustive()
	}
}

/// Step-by-step construction of a [`Transaction`].
#[derive(Default)]
pub struct TransactionBuilder {
	expander: Option<Arc<dyn KeyExpander>>,
	sink: Option<Sink<SearchResult>>,
	cancel: Option<CancelToken>,
	max_parallelism: usize,
}

impl TransactionBuilder {
	/// Consult `expander` for alternate keys.
	#[must_use]
	pub fn expander(mut self, expander: Arc<dyn KeyExpander>) -> Self {
		self.expander = Some(expander);
		self
	}

	/// Like [`TransactionBuilder::expander`] but accepts an optional expander.
	#[must_use]
	pub fn maybe_expander(mut self, expander: Option<Arc<dyn KeyExpander>>) -> Self {
		self.expander = expander;
		self
	}

	/// Deliver results into `sink`. Required.
	#[must_use]
	pub fn sink(mut self, sink: impl Into<Sink<SearchResult>>) -> Self {
		self.sink = Some(sink.into());
		self
	}

	/// Share an existing cancellation token instead of creating a fresh one.
	#[must_use]
	pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
		self.cancel = Some(cancel);
		self
	}

	/// Bound on each matcher's internal parallelism; zero selects the default.
	#[must_use]
	pub fn max_parallelism(mut self, max_parallelism: usize) -> Self {
		self.max_parallelism = max_parallelism;
		self
	}

	/// Finish construction with the matcher factory used for every key.
	pub fn build<F>(self, factory: F) -> Result<Transaction<F>, SearchError> {
		Transaction::new(
			self.expander,
			self.sink,
			self.cancel.unwrap_or_default(),
			self.max_parallelism,
			factory,
		)
	}
}
