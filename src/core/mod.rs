//! Core types and the front matter tag-merge engine
//!
//! - frontmatter: locating the `---` delimited header
//! - tag_block: decoding the `tags:` entry and its shape
//! - tags: normalization and merging
//! - rewrite: splicing the merged list back into the text
//! - document: the pipeline over one document
//! - vocabulary: known tags and processed documents
//! - solution: fenced solution code extraction

pub mod document;
pub mod frontmatter;
pub mod rewrite;
pub mod solution;
pub mod tag_block;
pub mod tags;
pub mod vocabulary;

pub use document::{apply_tags, Document, TagUpdate};
pub use frontmatter::{locate, Frontmatter, LineEnding};
pub use rewrite::{rewrite, serialize_tags};
pub use solution::extract_solution;
pub use tag_block::{parse, TagBlock, TagBlockShape, TextSpan};
pub use tags::{merge, normalize_tag, TagList};
pub use vocabulary::{ProcessedSet, Vocabulary};
