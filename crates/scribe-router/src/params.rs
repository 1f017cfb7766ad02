//! Path parameters captured while matching a request.
//!
//! Values are stored in declaration order using a small vector, so the
//! usual one or two captures never touch the heap.

use std::str::FromStr;

use smallvec::SmallVec;

const INLINE_PARAMS: usize = 4;

/// Captured `(name, value)` pairs from a matched route.
///
/// # Example
///
/// ```rust
/// use scribe_router::Params;
///
/// let mut params = Params::new();
/// params.push("id", "42");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.parse::<i64>("id"), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a captured value.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Drops captures past `len`. Used to undo a failed match branch.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }

    /// Returns the raw value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parses the value captured for `name`.
    ///
    /// Returns `None` when the parameter is absent or does not parse.
    #[must_use]
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of captured values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut params = Params::new();
        params.push("org", "acme");
        params.push("id", "7");

        assert_eq!(params.get("org"), Some("acme"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse() {
        let mut params = Params::new();
        params.push("id", "7");
        params.push("name", "seven");

        assert_eq!(params.parse::<u32>("id"), Some(7));
        assert_eq!(params.parse::<u32>("name"), None);
    }

    #[test]
    fn test_truncate_restores_earlier_state() {
        let mut params = Params::new();
        params.push("a", "1");
        let mark = params.len();
        params.push("b", "2");
        params.truncate(mark);

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "1")]);
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let params: Params = (0..10)
            .map(|i| (format!("key{i}"), format!("value{i}")))
            .collect();

        assert_eq!(params.len(), 10);
        assert_eq!(params.get("key9"), Some("value9"));
    }
}
