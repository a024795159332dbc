use crate::error::ExpandError;

/// Produces alternate lookup keys for a query key, such as phonetic or
/// transliterated spellings.
///
/// Expansion is best effort: callers treat an error the same as an empty
/// result.
pub trait KeyExpander: Send + Sync {
    /// Whether the expander currently has anything to offer.
    fn is_usable(&self) -> bool;

    /// Return the alternate keys for `key`, not including `key` itself.
    fn expand(&self, key: &str) -> Result<Vec<String>, ExpandError>;
}

impl<T: KeyExpander + ?Sized> KeyExpander for std::sync::Arc<T> {
    fn is_usable(&self) -> bool {
        (**self).is_usable()
    }

    fn expand(&self, key: &str) -> Result<Vec<String>, ExpandError> {
        (**self).expand(key)
    }
}
