//! Query codec - bidirectional conversion between ordered key/value state
//! and a URL query string, plus the single URL-building primitive both
//! router bindings use for query-only navigation.

use smallvec::SmallVec;
use std::fmt;

/// Maximum query pairs kept inline before heap allocation.
const MAX_INLINE_PAIRS: usize = 8;

/// Flat, insertion-ordered query state.
///
/// Decoding keeps the position of a key's first occurrence but the value of
/// its last; encoding walks pairs in order and omits empty values, so
/// `encode(decode(q))` is a normalization that is idempotent after the
/// first pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: SmallVec<[(String, String); MAX_INLINE_PAIRS]>,
}

impl Query {
    /// Empty query state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, tolerating a leading `?`.
    ///
    /// Percent-encoding and `+` are decoded. The last occurrence of a
    /// repeated key wins. Unparsable fragments are dropped rather than
    /// reported; a garbage query is an empty query, never an error.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            if key.is_empty() {
                continue;
            }
            query.set(&key, &value);
        }
        query
    }

    /// Serialize to a query string with no leading `?`.
    ///
    /// Keys are written in insertion order; keys with empty values are
    /// omitted.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            if value.is_empty() {
                continue;
            }
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a key, replacing the value in place when the key already exists
    /// (its position in the ordering is kept).
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(pair) = self.pairs.iter_mut().find(|(k, _)| k == key) {
            pair.1 = value.to_string();
        } else {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Remove a key if present.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// True when no pairs are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Shallow-merge a patch over this state.
    ///
    /// Patch entries with `None` or an empty value delete the key; any
    /// other value inserts or replaces it.
    pub fn merge(&mut self, patch: &QueryPatch) {
        for (key, value) in &patch.ops {
            match value {
                Some(v) if !v.is_empty() => self.set(key, v),
                _ => self.remove(key),
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (k, v) in iter {
            let (k, v) = (k.into(), v.into());
            query.set(&k, &v);
        }
        query
    }
}

/// An ordered set of query mutations applied by [`Query::merge`].
#[derive(Debug, Clone, Default)]
pub struct QueryPatch {
    ops: Vec<(String, Option<String>)>,
}

impl QueryPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key.
    #[must_use]
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.ops.push((key.to_string(), Some(value.to_string())));
        self
    }

    /// Delete a key.
    #[must_use]
    pub fn delete(mut self, key: &str) -> Self {
        self.ops.push((key.to_string(), None));
        self
    }
}

/// Derive the next URL for a query-only navigation.
///
/// Decodes `current_search`, merges `patch` over it, re-encodes, and
/// reassembles `base + pathname + ("?" + query)` without duplicating the
/// base prefix when `pathname` already carries it. Both router bindings
/// route every query mutation through this one primitive.
#[must_use]
pub fn build_url(base_path: &str, pathname: &str, current_search: &str, patch: &QueryPatch) -> String {
    let mut query = Query::decode(current_search);
    query.merge(patch);
    let encoded = query.encode();

    let path = pathname.strip_prefix(base_path).unwrap_or(pathname);
    let mut url = String::with_capacity(base_path.len() + path.len() + encoded.len() + 1);
    url.push_str(base_path);
    url.push_str(path);
    if !encoded.is_empty() {
        url.push('?');
        url.push_str(&encoded);
    }
    url
}
