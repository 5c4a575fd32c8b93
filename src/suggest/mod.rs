//! Tag suggestion service abstraction
//!
//! The tagger only needs something that turns solution code plus the known
//! vocabulary into a list of raw tag strings. [`OpenAiSuggester`] asks a
//! chat-completions endpoint; tests plug in a fixed implementation.

pub mod openai;

pub use openai::OpenAiSuggester;

use crate::core::Vocabulary;
use crate::error::{Result, TagMatterError};
use serde::Deserialize;

/// Tags proposed for one solution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    /// Raw tag strings, not yet normalized
    pub tags: Vec<String>,
    /// Explanation returned alongside the tags, if any
    pub rationale: Option<String>,
}

impl Suggestion {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            rationale: None,
        }
    }
}

/// Capability to propose tags for a piece of solution code
pub trait TagSuggester {
    fn suggest(&self, code: &str, vocabulary: &Vocabulary) -> Result<Suggestion>;
}

impl<T: TagSuggester + ?Sized> TagSuggester for &T {
    fn suggest(&self, code: &str, vocabulary: &Vocabulary) -> Result<Suggestion> {
        (**self).suggest(code, vocabulary)
    }
}

impl<T: TagSuggester + ?Sized> TagSuggester for Box<T> {
    fn suggest(&self, code: &str, vocabulary: &Vocabulary) -> Result<Suggestion> {
        (**self).suggest(code, vocabulary)
    }
}

/// Instructions sent as the system message, embedding the vocabulary
pub fn system_prompt(vocabulary: &Vocabulary) -> Result<String> {
    let known = serde_json::to_string(&vocabulary.to_vec())?;
    Ok(format!(
        "You are interacting with a user looking to categorize, within the Obsidian note-taking \
         application, solutions to coding problems such as those typically found on LeetCode. \
         Generate tags to be used to categorize the solutions for the provided solution code. \
         Output the tags, and your reasoning for choosing them, in JSON format as an object with \
         a \"tags\" array of strings and a \"reasoning\" string. Do not reference the programming \
         language as a tag. Use the following JSON array of tags to help with your \
         categorization, but feel free to add tags not included in the array:\n{known}"
    ))
}

#[derive(Deserialize)]
struct RawSuggestion {
    tags: Vec<String>,
    #[serde(default, alias = "reasoning")]
    rationale: Option<serde_json::Value>,
}

/// Decode the JSON object returned by the model.
///
/// The object must hold a `tags` array of strings; anything else is a
/// suggestion error for the current document.
pub fn parse_suggestion(content: &str) -> Result<Suggestion> {
    let raw: RawSuggestion = serde_json::from_str(content.trim())
        .map_err(|e| TagMatterError::suggestion(format!("malformed suggestion: {e}")))?;

    let rationale = raw.rationale.and_then(|value| match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    });

    Ok(Suggestion {
        tags: raw.tags,
        rationale,
    })
}
