//! tagmatter: merge suggested tags into the YAML front matter of markdown notes
//!
//! The library targets a corpus of solution notes (one markdown file per
//! coding problem). For each note it finds the fenced solution code, asks a
//! suggestion service for topic tags, and merges them into the note's
//! `tags:` list without disturbing anything else in the file. A shared
//! vocabulary of known tags grows as notes are tagged, and a processed set
//! remembers which notes are done.
//!
//! # Quick Start
//!
//! ## Merging tags into text
//!
//! ```rust
//! use tagmatter::apply_tags;
//!
//! let update = apply_tags("---\ntitle: Two Sum\ntags: []\n---\nbody\n", ["Hash Table", "array"]);
//! assert_eq!(
//!     update.content,
//!     "---\ntitle: Two Sum\ntags:\n  - array\n  - hash-table\n---\nbody\n"
//! );
//! assert!(update.changed);
//! ```
//!
//! ## Tagging files
//!
//! ```rust,no_run
//! use tagmatter::{Config, JsonFileStore, OpenAiSuggester, Result, Tagger, TaggerOptions};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<()> {
//!     let config = Config::default();
//!     let suggester = OpenAiSuggester::new("sk-...", config.suggest.clone())?;
//!     let mut tagger = Tagger::new(
//!         suggester,
//!         JsonFileStore::new(&config.vocabulary_path),
//!         JsonFileStore::new(&config.processed_path),
//!         TaggerOptions::default(),
//!     )?;
//!
//!     let summary = tagger.run_batch(&[PathBuf::from("1-two-sum.md")]);
//!     println!("{} tagged, {} failed", summary.succeeded(), summary.failed());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: front matter location, tag block parsing, normalization,
//!   merging, rewriting, the vocabulary and solution extraction
//! - [`io`]: file resolution, atomic writes and the JSON stores
//! - [`suggest`]: the tag suggestion service and its OpenAI client
//! - [`tagger`]: the per-document pipeline and batch driver
//! - [`config`]: `tagmatter.toml` settings
//! - [`error`]: error types shared by all of the above

pub use self::config::{Config, SuggestConfig};
pub use self::error::{ErrorSeverity, Result, TagMatterError};

pub use self::core::{
    apply_tags, extract_solution, merge, normalize_tag, Document, ProcessedSet, TagBlock,
    TagBlockShape, TagList, TagUpdate, Vocabulary,
};

pub use self::io::{JsonFileStore, MemoryStore, ProcessedStore, VocabularyStore};
pub use self::suggest::{OpenAiSuggester, Suggestion, TagSuggester};
pub use self::tagger::{BatchSummary, DocumentOutcome, TagReport, Tagger, TaggerOptions};

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod suggest;
pub mod tagger;

// CLI components are available only in the binary, not as part of the library API

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_end_to_end_workflow() {
        let temp_dir = TempDir::new().unwrap();
        let note = temp_dir.path().join("1-two-sum.md");
        fs::write(
            &note,
            "---\ntitle: Two Sum\n---\n# Two Sum\n\n```python\nreturn []\n```\n",
        )
        .unwrap();

        struct Fixed;
        impl TagSuggester for Fixed {
            fn suggest(&self, _code: &str, _vocabulary: &Vocabulary) -> Result<Suggestion> {
                Ok(Suggestion::new(["Array", "Hash Table"]))
            }
        }

        let mut tagger = Tagger::new(
            Fixed,
            JsonFileStore::new(temp_dir.path().join("topics.json")),
            JsonFileStore::new(temp_dir.path().join("processed_files.json")),
            TaggerOptions::default(),
        )
        .unwrap();

        let summary = tagger.run_batch(&[note.clone()]);
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(
            fs::read_to_string(&note).unwrap(),
            "---\ntitle: Two Sum\ntags:\n  - array\n  - hash-table\n---\n# Two Sum\n\n```python\nreturn []\n```\n"
        );

        let topics = fs::read_to_string(temp_dir.path().join("topics.json")).unwrap();
        let topics: Vec<String> = serde_json::from_str(&topics).unwrap();
        assert_eq!(topics, ["array", "hash-table"]);
    }

    #[test]
    fn test_error_handling() {
        let temp_dir = TempDir::new().unwrap();
        let err = crate::io::read_document(&temp_dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, TagMatterError::FileNotFound { .. }));
    }
}
