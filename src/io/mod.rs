//! File I/O: corpus documents and the persistent stores

pub mod fs;
pub mod store;

pub use fs::{document_id, generate_diff, is_markdown, read_document, resolve_files, write_atomic};
pub use store::{JsonFileStore, MemoryStore, ProcessedStore, VocabularyStore};
