//! Core data models used throughout Verse Harness.
//!
//! These types represent the verses, books, and chunks that flow through the
//! loading and chunking pipeline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered chunk metadata. Insertion order is preserved through
/// serialization, so the emitted JSONL is byte-stable across runs.
pub type Metadata = IndexMap<String, serde_json::Value>;

/// A single verse, immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Verse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// One book of a bible version. Verses are in canonical reading order.
#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    pub book: String,
    pub verses: Vec<Verse>,
}

/// A loaded bible version: an ordered sequence of books.
///
/// `name` is the source directory name and is used only for logging.
#[derive(Debug, Clone)]
pub struct Bible {
    pub name: String,
    pub books: Vec<Book>,
}

/// A bounded span of text plus provenance metadata — the unit of
/// downstream indexing. Created once by a chunker and never mutated
/// after the pipeline stamps its build id.
#[derive(Debug, Clone, Serialize)]
pub struct TextChunk {
    pub text: String,
    pub metadata: Metadata,
}

impl TextChunk {
    pub fn new(text: String, metadata: Metadata) -> Self {
        Self { text, metadata }
    }
}

/// A contiguous run of markdown under a heading hierarchy.
///
/// `header_path` holds `(field_name, title)` pairs for every ancestor
/// heading in scope, in configured header order. Transient: consumed
/// immediately by the length splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSection {
    pub content: String,
    pub header_path: Vec<(String, String)>,
}
