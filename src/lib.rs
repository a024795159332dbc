//! Multi-key fan-out search over a launcher catalog.
//!
//! A query is escaped into a literal key, optionally expanded into alternate
//! spellings by a [`KeyExpander`], and every key is matched concurrently
//! against the catalog. Results stream into a caller-owned [`Sink`] and are
//! ordered afterwards with [`ResultList::sort`].
//!
//! The root crate re-exports the shared data model from `fanout-api` so that
//! embedders can depend on this crate alone.

pub mod app_dirs;
pub mod catalog;
pub mod expand;
pub mod logging;
pub mod matcher;
pub mod search;

pub use fanout_api::{
	CancelToken, ExpandError, ItemId, ItemInfo, KeyExpander, KeyMatcher, MatchContext, MatchError,
	MatcherFactory, ResultList, SearchError, SearchResult, Sink,
};
pub use search::{SearchSummary, Transaction, TransactionBuilder};
