//! Persistence for the vocabulary and the processed set
//!
//! The tagger only talks to the two store traits, so the merge engine can be
//! driven against [`MemoryStore`] in tests and dry runs, and against
//! [`JsonFileStore`] in real runs.

use crate::core::{ProcessedSet, Vocabulary};
use crate::error::{Result, TagMatterError};
use crate::io::fs::write_atomic;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Repository for the known-tag vocabulary
pub trait VocabularyStore {
    fn load(&self) -> Result<Vocabulary>;
    fn save(&mut self, vocabulary: &Vocabulary) -> Result<()>;
}

/// Repository for the set of processed document identifiers
pub trait ProcessedStore {
    fn load(&self) -> Result<ProcessedSet>;
    fn save(&mut self, processed: &ProcessedSet) -> Result<()>;
}

/// A JSON array of strings on disk, rewritten in full on every save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned + Default>(&self) -> Result<T> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(T::default());
            }
            Err(e) => return Err(TagMatterError::store(&self.path, e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| TagMatterError::store(&self.path, format!("invalid JSON: {e}")))
    }

    fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');
        write_atomic(&self.path, &json)
            .map_err(|e| TagMatterError::store(&self.path, e.to_string()))
    }
}

impl VocabularyStore for JsonFileStore {
    fn load(&self) -> Result<Vocabulary> {
        self.read()
    }

    fn save(&mut self, vocabulary: &Vocabulary) -> Result<()> {
        self.write(vocabulary)
    }
}

impl ProcessedStore for JsonFileStore {
    fn load(&self) -> Result<ProcessedSet> {
        self.read()
    }

    fn save(&mut self, processed: &ProcessedSet) -> Result<()> {
        self.write(processed)
    }
}

/// In-memory store that counts how often it was saved
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<T> {
    value: T,
    saves: usize,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new(value: T) -> Self {
        Self { value, saves: 0 }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn store(&mut self, value: &T) {
        self.value = value.clone();
        self.saves += 1;
    }
}

impl VocabularyStore for MemoryStore<Vocabulary> {
    fn load(&self) -> Result<Vocabulary> {
        Ok(self.value.clone())
    }

    fn save(&mut self, vocabulary: &Vocabulary) -> Result<()> {
        self.store(vocabulary);
        Ok(())
    }
}

impl ProcessedStore for MemoryStore<ProcessedSet> {
    fn load(&self) -> Result<ProcessedSet> {
        Ok(self.value.clone())
    }

    fn save(&mut self, processed: &ProcessedSet) -> Result<()> {
        self.store(processed);
        Ok(())
    }
}
