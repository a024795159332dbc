//! Data model and collaborator interfaces shared by the fanout search
//! coordinator and the matchers and expanders plugged into it.

pub mod error;
pub mod expand;
pub mod item;
pub mod matching;
pub mod result;

pub use error::{ExpandError, MatchError, SearchError};
pub use expand::KeyExpander;
pub use item::{ItemId, ItemInfo};
pub use matching::{KeyMatcher, MatchContext, MatcherFactory};
pub use result::{ResultList, SearchResult};

pub use fanout_stream::{CancelToken, Sink};
