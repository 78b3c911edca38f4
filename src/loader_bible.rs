//! Bible version loader.
//!
//! A bible version is a directory holding one JSON file per book
//! (`{"book": ..., "verses": [{"chapter", "verse", "text"}, ...]}`).
//! Files are matched against the configured globs and processed in
//! lexicographic filename order, so numeric prefixes (`01-genesis.json`)
//! fix the canonical book order.

use std::path::Path;

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::models::{Bible, Book};

/// Load one bible version from `dir`. A missing directory is an error —
/// the caller cannot produce a meaningful partial corpus without it.
pub fn load_bible_dir(dir: &Path, book_globs: &[String]) -> Result<Bible> {
    if !dir.is_dir() {
        bail!("bible version directory not found: {}", dir.display());
    }

    let include_set = build_globset(book_globs)?;

    let mut files: Vec<(String, std::path::PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(dir).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();
        if !include_set.is_match(&rel_str) {
            continue;
        }
        files.push((rel_str, path.to_path_buf()));
    }

    // Sort for deterministic book order
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut books = Vec::with_capacity(files.len());
    for (_, path) in &files {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read book file: {}", path.display()))?;
        let book: Book = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse book file: {}", path.display()))?;
        books.push(book);
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string());

    Ok(Bible { name, books })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn book_json(name: &str, verses: &[(u32, u32, &str)]) -> String {
        let verses: Vec<String> = verses
            .iter()
            .map(|(c, v, t)| {
                format!(r#"{{"book":"{name}","chapter":{c},"verse":{v},"text":"{t}"}}"#)
            })
            .collect();
        format!(r#"{{"book":"{name}","verses":[{}]}}"#, verses.join(","))
    }

    #[test]
    fn loads_books_in_filename_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(
            tmp.path().join("02-exodus.json"),
            book_json("Exodus", &[(1, 1, "second")]),
        )
        .unwrap();
        fs::write(
            tmp.path().join("01-genesis.json"),
            book_json("Genesis", &[(1, 1, "first")]),
        )
        .unwrap();
        fs::write(tmp.path().join("notes.txt"), "not a book").unwrap();

        let bible = load_bible_dir(tmp.path(), &["*.json".to_string()]).unwrap();
        assert_eq!(bible.books.len(), 2);
        assert_eq!(bible.books[0].book, "Genesis");
        assert_eq!(bible.books[1].book, "Exodus");
        assert_eq!(bible.books[0].verses[0].text, "first");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(load_bible_dir(&missing, &["*.json".to_string()]).is_err());
    }

    #[test]
    fn malformed_book_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("01-bad.json"), "{not json").unwrap();
        assert!(load_bible_dir(tmp.path(), &["*.json".to_string()]).is_err());
    }

    #[test]
    fn empty_directory_yields_empty_bible() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bible = load_bible_dir(tmp.path(), &["*.json".to_string()]).unwrap();
        assert!(bible.books.is_empty());
    }
}
