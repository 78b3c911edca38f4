//! Sliding-window chunker for ordered verse sequences.
//!
//! Walks a book's verses in canonical order, accumulating them into a
//! window until the next verse would push the concatenated text past the
//! character budget. The window is then emitted as one chunk and trimmed
//! from the front until at most `overlap` characters remain, so the tail
//! verses seed the next chunk. A verse is never split: a single verse
//! longer than the budget is emitted whole.

use std::collections::VecDeque;

use anyhow::{bail, Result};
use serde_json::json;

use crate::models::{Book, Metadata, TextChunk, Verse};

/// Split one book into overlapping chunks of at most `chunk_size`
/// characters (soft cap — an oversized single verse still goes out whole).
///
/// Chunk metadata carries the book name, the first and last verse
/// reference, and `category = "bible"`.
pub fn chunk_book(book: &Book, chunk_size: usize, overlap: usize) -> Result<Vec<TextChunk>> {
    if chunk_size == 0 {
        bail!("chunk_size must be > 0");
    }
    if overlap >= chunk_size {
        bail!(
            "overlap ({}) must be smaller than chunk_size ({})",
            overlap,
            chunk_size
        );
    }

    let mut chunks = Vec::new();
    let mut window: VecDeque<&Verse> = VecDeque::new();
    // Char length of the window's concatenated verse texts.
    let mut window_len = 0usize;

    for verse in &book.verses {
        let verse_len = verse.text.chars().count();
        if window_len + verse_len > chunk_size && !window.is_empty() {
            chunks.push(quote_chunk(&book.book, &window));
            // Keep a tail of whole verses within the overlap budget.
            while let Some(front) = window.front() {
                if window_len <= overlap {
                    break;
                }
                window_len -= front.text.chars().count();
                window.pop_front();
            }
        }
        window.push_back(verse);
        window_len += verse_len;
    }

    if !window.is_empty() {
        chunks.push(quote_chunk(&book.book, &window));
    }
    Ok(chunks)
}

/// Build a quote chunk from the verses currently in the window.
fn quote_chunk(book: &str, window: &VecDeque<&Verse>) -> TextChunk {
    let text: String = window.iter().map(|v| v.text.as_str()).collect();
    let first = window.front().expect("window is non-empty");
    let last = window.back().expect("window is non-empty");

    let mut metadata = Metadata::new();
    metadata.insert("book".to_string(), json!(book));
    metadata.insert("start_chapter".to_string(), json!(first.chapter));
    metadata.insert("start_verse".to_string(), json!(first.verse));
    metadata.insert("end_chapter".to_string(), json!(last.chapter));
    metadata.insert("end_verse".to_string(), json!(last.verse));
    metadata.insert("category".to_string(), json!("bible"));
    TextChunk::new(text, metadata)
}
