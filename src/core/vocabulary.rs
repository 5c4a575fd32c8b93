//! The known-tag vocabulary and the set of processed documents
//!
//! Both only ever grow. The vocabulary is handed to the suggestion service
//! so it reuses existing tags; the processed set filters documents that
//! already went through the tagger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Every tag accepted so far, kept in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(BTreeSet<String>);

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Tags in canonical order, as sent to the suggestion service
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Union with `accepted`, returning the new vocabulary and what was new.
    ///
    /// `self` is left untouched; nothing is ever removed.
    pub fn update<I>(&self, accepted: I) -> (Vocabulary, BTreeSet<String>)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut next = self.0.clone();
        let mut added = BTreeSet::new();
        for tag in accepted {
            let tag = tag.as_ref();
            if next.insert(tag.to_string()) {
                added.insert(tag.to_string());
            }
        }
        (Vocabulary(next), added)
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Identifiers (file names) of documents that were tagged successfully
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessedSet(BTreeSet<String>);

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Record a document; returns `false` if it was already recorded
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ProcessedSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
