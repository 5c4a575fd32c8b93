//! Per-document tagging pipeline and the sequential batch driver
//!
//! One document at a time: read it, extract the solution, ask for tags,
//! merge them into the front matter, write the file back atomically, then
//! grow the vocabulary and record the document as processed. Stores are
//! only saved after the document itself was written.

use crate::core::{
    extract_solution, Document, ProcessedSet, TagBlockShape, TagList, TagUpdate, Vocabulary,
};
use crate::error::{Result, TagMatterError};
use crate::io::{
    document_id, generate_diff, read_document, write_atomic, ProcessedStore, VocabularyStore,
};
use crate::suggest::TagSuggester;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Behaviour switches for a tagging run
#[derive(Debug, Clone, Default)]
pub struct TaggerOptions {
    /// Only fenced blocks in this language count as the solution
    pub language: Option<String>,
    /// Compute changes and diffs without writing anything
    pub dry_run: bool,
}

/// What happened to one successfully handled document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReport {
    pub path: PathBuf,
    /// Shape of the tag block before the update
    pub shape: TagBlockShape,
    /// Full tag list now in the document
    pub tags: TagList,
    /// Tags that were new to the vocabulary
    pub added: BTreeSet<String>,
    pub rationale: Option<String>,
    pub changed: bool,
    pub header_created: bool,
    /// Diff of the document, filled in for dry runs
    pub diff: Option<String>,
}

/// Result of one document in a batch
#[derive(Debug)]
pub struct DocumentOutcome {
    pub id: String,
    pub result: Result<TagReport>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Failure reason, `None` on success
    pub fn reason(&self) -> Option<String> {
        self.result.as_ref().err().map(ToString::to_string)
    }
}

/// Per-document outcomes of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Drives the tag-merge engine over documents on disk
pub struct Tagger<S, V, P> {
    suggester: S,
    vocabulary_store: V,
    processed_store: P,
    vocabulary: Vocabulary,
    processed: ProcessedSet,
    options: TaggerOptions,
}

impl<S, V, P> Tagger<S, V, P>
where
    S: TagSuggester,
    V: VocabularyStore,
    P: ProcessedStore,
{
    /// Create a tagger, loading both stores once
    pub fn new(
        suggester: S,
        vocabulary_store: V,
        processed_store: P,
        options: TaggerOptions,
    ) -> Result<Self> {
        let vocabulary = vocabulary_store.load()?;
        let processed = processed_store.load()?;
        debug!(
            "Loaded {} known tags and {} processed documents",
            vocabulary.len(),
            processed.len()
        );

        Ok(Self {
            suggester,
            vocabulary_store,
            processed_store,
            vocabulary,
            processed,
            options,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn processed(&self) -> &ProcessedSet {
        &self.processed
    }

    pub fn options(&self) -> &TaggerOptions {
        &self.options
    }

    /// Give the stores back, e.g. to inspect them after a run
    pub fn into_stores(self) -> (V, P) {
        (self.vocabulary_store, self.processed_store)
    }

    /// Documents that were not processed yet
    pub fn pending(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths
            .iter()
            .filter(|path| !self.processed.contains(&document_id(path)))
            .cloned()
            .collect()
    }

    /// Suggest tags for a document's solution and merge them in
    pub fn tag_document(&mut self, path: &Path) -> Result<TagReport> {
        let text = read_document(path)?;
        let document = Document::parse(&text);

        let code = extract_solution(document.body(), self.options.language.as_deref())
            .ok_or_else(|| TagMatterError::no_solution_text(path))?;

        let suggestion = self.suggester.suggest(&code, &self.vocabulary)?;
        debug!("Suggested for {}: {:?}", path.display(), suggestion.tags);
        if let Some(rationale) = &suggestion.rationale {
            debug!("Rationale: {}", rationale);
        }
        if suggestion.tags.is_empty() {
            warn!("No tags suggested for {}", path.display());
        }

        let update = document.apply_tags(&suggestion.tags);
        let mut report = self.commit(path, &text, update, true)?;
        report.rationale = suggestion.rationale;
        Ok(report)
    }

    /// Merge tags given by hand, without asking the suggestion service.
    ///
    /// The vocabulary grows, but the document is not marked processed.
    pub fn apply_document<I>(&mut self, path: &Path, tags: I) -> Result<TagReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let text = read_document(path)?;
        let update = Document::parse(&text).apply_tags(tags);
        self.commit(path, &text, update, false)
    }

    /// Tag every document in order; failures are recorded, not propagated
    pub fn run_batch(&mut self, paths: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for path in paths {
            let id = document_id(path);
            info!("Processing {}", id);

            let result = self.tag_document(path);
            let stop = match &result {
                Ok(report) => {
                    info!("Updated tags for {}: {}", id, report.tags.as_slice().join(", "));
                    false
                }
                Err(e) => {
                    warn!("Failed to tag {} [{}]: {}", id, e.severity(), e);
                    !e.is_recoverable()
                }
            };
            summary.outcomes.push(DocumentOutcome { id, result });

            if stop {
                error!("Stopping batch after unrecoverable error");
                break;
            }
        }

        summary
    }

    fn commit(
        &mut self,
        path: &Path,
        original: &str,
        update: TagUpdate,
        mark_processed: bool,
    ) -> Result<TagReport> {
        let (vocabulary, added) = self.vocabulary.update(&update.tags);

        let mut report = TagReport {
            path: path.to_path_buf(),
            shape: update.shape,
            tags: update.tags,
            added,
            rationale: None,
            changed: update.changed,
            header_created: update.header_created,
            diff: None,
        };

        if self.options.dry_run {
            report.diff = generate_diff(original, &update.content, path);
            return Ok(report);
        }

        if update.changed {
            write_atomic(path, &update.content)?;
        } else {
            debug!("{} already carries these tags", path.display());
        }

        self.vocabulary_store.save(&vocabulary)?;
        self.vocabulary = vocabulary;

        if mark_processed {
            let mut processed = self.processed.clone();
            processed.insert(document_id(path));
            self.processed_store.save(&processed)?;
            self.processed = processed;
        }

        Ok(report)
    }
}
