//! Interfaces for the per-key matchers driven by the search coordinator.

use std::sync::Arc;

use fanout_stream::{CancelToken, Sink};

use crate::error::MatchError;
use crate::result::SearchResult;

/// Everything a per-key matcher is bound to when it is created.
///
/// Every matcher spawned for one search shares the same sink and the same
/// cancellation signal.
#[derive(Debug, Clone)]
pub struct MatchContext {
    /// Destination for matches; shared by every concurrent matcher.
    pub sink: Sink<SearchResult>,
    /// Signal polled to curtail work early.
    pub cancel: CancelToken,
    /// Upper bound on the matcher's own internal parallelism.
    pub max_parallelism: usize,
}

impl MatchContext {
    /// Deliver a match, returning `false` once the consumer has gone away.
    pub fn emit(&self, result: SearchResult) -> bool {
        self.sink.send(result)
    }

    /// Whether the search has been cancelled.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Matches a single key against a dataset, streaming results into the sink
/// of the [`MatchContext`] it was created with.
pub trait KeyMatcher<I> {
    fn run_once(&mut self, key: &str, dataset: &[I]) -> Result<(), MatchError>;
}

/// Creates a fresh [`KeyMatcher`] for every key a search dispatches.
pub trait MatcherFactory<I>: Sync {
    type Matcher: KeyMatcher<I>;

    fn create(&self, ctx: MatchContext) -> Result<Self::Matcher, MatchError>;
}

/// Adapts a plain function into a [`MatcherFactory`].
///
/// Handy for embedders whose matching logic needs no per-key state.
pub struct FnMatcherFactory<F> {
    run: Arc<F>,
}

impl<F> FnMatcherFactory<F> {
    pub fn new(run: F) -> Self {
        Self { run: Arc::new(run) }
    }
}

/// Matcher produced by [`FnMatcherFactory`].
pub struct FnKeyMatcher<F> {
    run: Arc<F>,
    ctx: MatchContext,
}

impl<I, F> KeyMatcher<I> for FnKeyMatcher<F>
where
    F: Fn(&str, &[I], &MatchContext) -> Result<(), MatchError>,
{
    fn run_once(&mut self, key: &str, dataset: &[I]) -> Result<(), MatchError> {
        (self.run)(key, dataset, &self.ctx)
    }
}

impl<I, F> MatcherFactory<I> for FnMatcherFactory<F>
where
    F: Fn(&str, &[I], &MatchContext) -> Result<(), MatchError> + Send + Sync,
{
    type Matcher = FnKeyMatcher<F>;

    fn create(&self, ctx: MatchContext) -> Result<Self::Matcher, MatchError> {
        Ok(FnKeyMatcher {
            run: Arc::clone(&self.run),
            ctx,
        })
    }
}
