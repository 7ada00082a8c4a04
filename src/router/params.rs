use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::types::ParamValue;

/// Maximum number of path parameters stored inline before spilling to the heap.
/// Most route patterns carry ≤4 parameters.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Inline storage for extracted parameters, in path order
pub type ParamVec = SmallVec<[(Arc<str>, ParamValue); MAX_INLINE_PARAMS]>;

/// Parameters extracted by a successful resolve, keyed by declared name.
///
/// Names are shared with the compiled route (`Arc<str>`), so building a
/// match only allocates for the values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: Arc<str>, value: ParamValue) {
        self.inner.push((name, value));
    }

    /// Value of the parameter `name`.
    ///
    /// Uses "last write wins" semantics if a pattern repeats a name.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.inner
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `(name, value)` pairs in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Convert to a `HashMap`
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, ParamValue> {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a ParamValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a ParamValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
