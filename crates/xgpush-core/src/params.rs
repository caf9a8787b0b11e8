//! Canonical parameter sets.
//!
//! A [`ParamSet`] is the only container request fields travel in. It makes the
//! ordering rule explicit instead of relying on map iteration order:
//! - keys are unique (last write wins)
//! - iteration is lexicographic by key (byte order), independent of insertion order
//! - values are plain strings; callers pre-serialize anything structured
//!
//! The request signature is computed over this ordering, so it must never
//! depend on how the set was populated.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::{XgError, XgResult};

/// Ordered, deduplicated mapping of field name to field value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParamSet {
    fields: BTreeMap<String, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from pairs. Later duplicates overwrite earlier ones.
    pub fn try_from_pairs<I, K, V>(pairs: I) -> XgResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (k, v) in pairs {
            set.set(k, v)?;
        }
        Ok(set)
    }

    /// Insert or overwrite a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> XgResult<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(XgError::invalid_argument("parameter key must not be empty"));
        }
        self.fields.insert(key, value.into());
        Ok(())
    }

    /// Builder-style [`ParamSet::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> XgResult<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Insert a value rendered through `Display` (numbers, enums with a wire form).
    pub fn set_display(&mut self, key: impl Into<String>, value: impl std::fmt::Display) -> XgResult<()> {
        self.set(key, value.to_string())
    }

    /// Insert a value serialized as compact JSON (lists, objects).
    pub fn set_json<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> XgResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| XgError::serialization(format!("failed to serialize parameter: {e}")))?;
        self.set(key, json)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Lexicographically ordered `(key, value)` pairs.
    ///
    /// The iterator is lazy and `Clone`, so a consumer can restart it; calling
    /// this method again also yields the same sequence.
    pub fn sorted_pairs(&self) -> SortedPairs<'_> {
        SortedPairs {
            inner: self.fields.iter(),
        }
    }
}

/// Iterator returned by [`ParamSet::sorted_pairs`].
#[derive(Debug, Clone)]
pub struct SortedPairs<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for SortedPairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SortedPairs<'_> {}

impl<'a> IntoIterator for &'a ParamSet {
    type Item = (&'a str, &'a str);
    type IntoIter = SortedPairs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_pairs()
    }
}
