//! Output values of a search and the ordering contract consumers sort by.

use std::ops::{Deref, DerefMut};

use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// A single match delivered to the result sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: ItemId,
    pub name: String,
    /// Relevance; higher is better and there is no upper bound.
    pub score: u32,
}

impl SearchResult {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, score: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
        }
    }
}

/// Collected results, ordered by descending score.
///
/// Entries with equal scores have no defined relative order after sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultList(Vec<SearchResult>);

impl ResultList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain `rx` until every producer has hung up.
    #[must_use]
    pub fn collect_from(rx: &Receiver<SearchResult>) -> Self {
        rx.iter().collect()
    }

    /// Whether the entry at `i` orders before the entry at `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn less(&self, i: usize, j: usize) -> bool {
        self.0[i].score > self.0[j].score
    }

    /// Sort by descending score. The sort is not stable.
    pub fn sort(&mut self) {
        self.0.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    }

    /// Sort and keep at most `limit` entries.
    pub fn sort_and_truncate(&mut self, limit: usize) {
        self.sort();
        self.0.truncate(limit);
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<SearchResult> {
        self.0
    }
}

impl Deref for ResultList {
    type Target = [SearchResult];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ResultList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<SearchResult>> for ResultList {
    fn from(results: Vec<SearchResult>) -> Self {
        Self(results)
    }
}

impl FromIterator<SearchResult> for ResultList {
    fn from_iter<T: IntoIterator<Item = SearchResult>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ResultList {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
