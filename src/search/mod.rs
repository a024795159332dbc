//! Multi-key fan-out search.
//!
//! A [`Transaction`] turns one user query into a set of lookup keys (the
//! pattern-escaped query plus any alternate spellings a [`KeyExpander`]
//! offers) and matches every key against the dataset on a fixed pool of key
//! workers. Matches stream into the caller's sink as they are found; the
//! call itself returns once every worker has joined.
//!
//! [`KeyExpander`]: fanout_api::KeyExpander

mod keys;
mod transaction;
mod worker;

pub use keys::normalize_query;
pub use transaction::{SearchSummary, Transaction, TransactionBuilder};

/// Number of key workers draining the key feed of one search.
pub const KEY_WORKERS: usize = 5;

/// Parallelism bound handed to matchers when the caller asks for none.
pub const DEFAULT_PARALLELISM: usize = 20;

#[cfg(test)]
mod tests;
