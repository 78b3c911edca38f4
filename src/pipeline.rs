//! Chunking pipeline orchestration.
//!
//! Drives the full build: every configured bible version is loaded and
//! chunked book by book, then the article corpus is section-split and
//! length-split. Each emitted chunk receives a run-scoped, strictly
//! increasing `data_build_id` before it reaches the JSONL sink. Bible and
//! article chunks share one id counter, so ids are a total order over the
//! whole run.

use std::path::Path;

use anyhow::{bail, Result};
use chrono::Local;
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::loader_article;
use crate::loader_bible;
use crate::models::{Book, Metadata, TextChunk};
use crate::sink::JsonlSink;
use crate::split_length;
use crate::split_markdown;
use crate::split_verse;

/// Size budget for one chunker invocation.
#[derive(Debug, Clone, Copy)]
pub struct ChunkParams {
    pub chunk_size: usize,
    pub overlap: usize,
}

/// Issues `{run_timestamp}-{counter}` build ids. One instance lives for
/// exactly one build; the counter spans bible and article chunks alike.
#[derive(Debug)]
pub struct BuildIdSequence {
    stamp: String,
    counter: u64,
}

impl BuildIdSequence {
    pub fn new() -> Self {
        Self::with_stamp(Local::now().format("%Y%m%d%H%M%S").to_string())
    }

    pub fn with_stamp(stamp: String) -> Self {
        Self { stamp, counter: 0 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.stamp, self.counter);
        self.counter += 1;
        id
    }
}

impl Default for BuildIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Chunk one bible book with the sliding verse window.
pub fn chunk_bible_book(book: &Book, params: &ChunkParams) -> Result<Vec<TextChunk>> {
    split_verse::chunk_book(book, params.chunk_size, params.overlap)
}

/// Chunk one markdown article: split into heading sections, then
/// length-split each section. Every chunk carries a deep copy of the
/// caller metadata plus `md_<field>` entries for the headers in scope,
/// `category = "article"`, and a `chunk_index` local to its section.
pub fn chunk_article(
    text: &str,
    metadata: &Metadata,
    params: &ChunkParams,
) -> Result<Vec<TextChunk>> {
    let header_rules = split_markdown::default_header_rules();
    let separators = split_length::default_separators();

    let mut chunks = Vec::new();
    for section in split_markdown::split_sections(text, &header_rules) {
        let mut section_metadata = metadata.clone();
        for (field, title) in &section.header_path {
            section_metadata.insert(format!("md_{field}"), json!(title));
        }

        let pieces = split_length::split_text(
            &section.content,
            params.chunk_size,
            params.overlap,
            &separators,
        )?;
        for (chunk_index, piece) in pieces.into_iter().enumerate() {
            let mut chunk_metadata = section_metadata.clone();
            chunk_metadata.insert("category".to_string(), json!("article"));
            chunk_metadata.insert("chunk_index".to_string(), json!(chunk_index));
            chunks.push(TextChunk::new(piece, chunk_metadata));
        }
    }
    Ok(chunks)
}

/// Counts reported after a build.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub bible_versions: usize,
    pub books: usize,
    pub articles: usize,
    pub chunks: u64,
}

/// Run the full batch build.
///
/// `output` overrides the configured output path. With `dry_run`, chunk
/// counts are computed and printed but nothing is written.
pub fn run_build(config: &Config, output: Option<&Path>, dry_run: bool) -> Result<BuildSummary> {
    let mut ids = BuildIdSequence::new();
    let out_path = output.unwrap_or(&config.output.path);
    let mut sink = if dry_run {
        None
    } else {
        Some(JsonlSink::create(out_path)?)
    };

    let bible_params = ChunkParams {
        chunk_size: config.chunking.bible.chunk_size,
        overlap: config.chunking.bible.overlap,
    };
    let article_params = ChunkParams {
        chunk_size: config.chunking.article.chunk_size,
        overlap: config.chunking.article.overlap,
    };

    let mut summary = BuildSummary::default();

    for version_dir in &config.data.bible_versions {
        if !version_dir.is_dir() {
            bail!(
                "bible version directory not found: {}",
                version_dir.display()
            );
        }
        info!(path = %version_dir.display(), "loading bible version");
        let bible = loader_bible::load_bible_dir(version_dir, &config.data.book_globs)?;

        for book in &bible.books {
            info!(version = %bible.name, book = %book.book, "processing book");
            let chunks = chunk_bible_book(book, &bible_params)?;
            emit(&mut sink, &mut ids, chunks, &mut summary)?;
        }
        summary.bible_versions += 1;
        summary.books += bible.books.len();
    }

    for article in loader_article::load_articles(&config.data.articles_dir)? {
        info!(path = %article.path.display(), "processing article");
        let chunks = chunk_article(&article.text, &article.metadata, &article_params)?;
        emit(&mut sink, &mut ids, chunks, &mut summary)?;
        summary.articles += 1;
    }

    if let Some(sink) = sink {
        sink.finish()?;
    }

    if dry_run {
        println!("build (dry-run)");
    } else {
        println!("build -> {}", out_path.display());
    }
    println!("  bible versions: {}", summary.bible_versions);
    println!("  books: {}", summary.books);
    println!("  articles: {}", summary.articles);
    println!("  chunks written: {}", summary.chunks);
    println!("ok");

    Ok(summary)
}

fn emit<W: std::io::Write>(
    sink: &mut Option<JsonlSink<W>>,
    ids: &mut BuildIdSequence,
    chunks: Vec<TextChunk>,
    summary: &mut BuildSummary,
) -> Result<()> {
    for mut chunk in chunks {
        chunk
            .metadata
            .insert("data_build_id".to_string(), json!(ids.next_id()));
        if let Some(sink) = sink.as_mut() {
            sink.write_chunk(&chunk)?;
        }
        summary.chunks += 1;
    }
    Ok(())
}
