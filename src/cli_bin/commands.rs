//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use dialoguer::{theme::ColorfulTheme, Select};
use log::{debug, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use tagmatter::error::{Result, TagMatterError};
use tagmatter::io::{document_id, resolve_files, JsonFileStore, ProcessedStore, VocabularyStore};
use tagmatter::suggest::{OpenAiSuggester, Suggestion, TagSuggester};
use tagmatter::tagger::{BatchSummary, TagReport, Tagger, TaggerOptions};
use tagmatter::{Config, Vocabulary};

/// Stands in for the suggestion service when tags are given by hand
struct ManualTags;

impl TagSuggester for ManualTags {
    fn suggest(&self, _code: &str, _vocabulary: &Vocabulary) -> Result<Suggestion> {
        Ok(Suggestion::default())
    }
}

/// Note directory and store locations after applying flags over config
struct Corpus {
    dir: Option<PathBuf>,
    vocabulary: PathBuf,
    processed: PathBuf,
}

impl Corpus {
    fn resolve(options: &CorpusOptions, config: &Config) -> Self {
        Self {
            dir: options.dir.clone().or_else(|| config.problem_dir.clone()),
            vocabulary: options
                .vocabulary
                .clone()
                .unwrap_or_else(|| config.vocabulary_path.clone()),
            processed: options
                .processed
                .clone()
                .unwrap_or_else(|| config.processed_path.clone()),
        }
    }

    /// Every markdown note in the problem directory
    fn documents(&self) -> Result<Vec<PathBuf>> {
        let dir = self.dir.as_ref().ok_or_else(|| {
            TagMatterError::config("No problem directory: pass --dir or set LEETCODE_PROBLEM_DIR")
        })?;
        if !dir.is_dir() {
            return Err(TagMatterError::file_not_found(dir));
        }
        Ok(resolve_files(std::slice::from_ref(dir)))
    }

    fn vocabulary_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.vocabulary)
    }

    fn processed_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.processed)
    }
}

/// Execute the tag command
pub fn tag_command(args: TagArgs, config: &Config) -> Result<ExitCode> {
    debug!("Executing tag command with args: {:?}", args.files);

    let corpus = Corpus::resolve(&args.corpus, config);
    let api_key = args.api_key.ok_or_else(|| {
        TagMatterError::config("No API key: pass --api-key or set OPENAI_API_KEY")
    })?;

    let mut suggest = config.suggest.clone();
    if let Some(model) = args.model {
        suggest.model = model;
    }

    let options = TaggerOptions {
        language: args.language.or_else(|| config.language.clone()),
        dry_run: args.dry_run,
    };
    let mut tagger = Tagger::new(
        OpenAiSuggester::new(api_key, suggest)?,
        corpus.vocabulary_store(),
        corpus.processed_store(),
        options,
    )?;

    let selected = if !args.files.is_empty() {
        expand_paths(&args.files)
    } else {
        let documents = corpus.documents()?;
        let candidates = if args.regenerate {
            documents
        } else {
            tagger.pending(&documents)
        };

        if candidates.is_empty() {
            println!("All problems have been processed.");
            return Ok(ExitCode::SUCCESS);
        }

        if args.all {
            candidates
        } else {
            let choice = select_document(&candidates)?;
            println!("Selected problem: {}", document_id(&choice));
            vec![choice]
        }
    };

    if selected.is_empty() {
        warn!("No files found to process");
        return Ok(ExitCode::SUCCESS);
    }

    let summary = tagger.run_batch(&selected);
    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(report) => print_report(&outcome.id, report),
            Err(e) => eprintln!("Failed to tag {}: {}", outcome.id, e),
        }
    }
    print_summary(&summary);

    Ok(exit_code(summary.failed()))
}

/// Execute the apply command
pub fn apply_command(args: ApplyArgs, config: &Config) -> Result<ExitCode> {
    debug!("Executing apply command with tags: {:?}", args.tags);

    let corpus = Corpus::resolve(&args.corpus, config);
    let options = TaggerOptions {
        language: None,
        dry_run: args.dry_run,
    };
    let mut tagger = Tagger::new(
        ManualTags,
        corpus.vocabulary_store(),
        corpus.processed_store(),
        options,
    )?;

    let mut failed = 0;
    for path in expand_paths(&args.files) {
        let id = document_id(&path);
        match tagger.apply_document(&path, &args.tags) {
            Ok(report) => print_report(&id, &report),
            Err(e) => {
                failed += 1;
                eprintln!("Failed to update {}: {}", id, e);
            }
        }
    }

    Ok(exit_code(failed))
}

/// Execute the pending command
pub fn pending_command(args: PendingArgs, config: &Config) -> Result<()> {
    let corpus = Corpus::resolve(&args.corpus, config);
    let processed = ProcessedStore::load(&corpus.processed_store())?;

    let pending: Vec<PathBuf> = corpus
        .documents()?
        .into_iter()
        .filter(|path| !processed.contains(&document_id(path)))
        .collect();

    if pending.is_empty() {
        println!("All problems have been processed.");
    }
    for path in &pending {
        println!("{}", document_id(path));
    }
    Ok(())
}

/// Execute the vocab command
pub fn vocab_command(args: VocabArgs, config: &Config) -> Result<()> {
    let corpus = Corpus::resolve(&args.corpus, config);
    let vocabulary = VocabularyStore::load(&corpus.vocabulary_store())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&vocabulary)?);
    } else {
        for tag in vocabulary.iter() {
            println!("{}", tag);
        }
    }
    Ok(())
}

// Helper functions

/// Expand directories into their notes; other paths are kept so missing
/// files show up as failures
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut expanded = Vec::new();
    for path in paths {
        if path.is_dir() {
            expanded.extend(resolve_files(std::slice::from_ref(path)));
        } else {
            expanded.push(path.clone());
        }
    }
    expanded
}

fn select_document(candidates: &[PathBuf]) -> Result<PathBuf> {
    let items: Vec<String> = candidates.iter().map(|p| document_id(p)).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which problem would you like to select?")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| TagMatterError::prompt(e.to_string()))?;
    Ok(candidates[selection].clone())
}

fn print_report(id: &str, report: &TagReport) {
    if let Some(diff) = &report.diff {
        println!("{}", diff);
    }

    let tags = report.tags.as_slice().join(", ");
    if report.diff.is_some() {
        println!("Would update tags for {}: {}", id, tags);
    } else if report.changed {
        println!("Updated tags for {}: {}", id, tags);
    } else {
        println!("Tags already up to date for {}: {}", id, tags);
    }

    if !report.added.is_empty() {
        let added: Vec<&str> = report.added.iter().map(String::as_str).collect();
        println!("New tags: {}", added.join(", "));
    }
    if let Some(rationale) = &report.rationale {
        debug!("{}: {}", report.path.display(), rationale);
    }
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "Tagged {} of {} documents ({} failed)",
        summary.succeeded(),
        summary.outcomes.len(),
        summary.failed()
    );
}

fn exit_code(failed: usize) -> ExitCode {
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
