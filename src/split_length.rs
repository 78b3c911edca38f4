//! Length-bounded text splitter with separator priority.
//!
//! Splits text into chunks no longer than `chunk_size` characters by trying
//! an ordered list of separators: paragraph breaks first, then line breaks,
//! then sentence-ending punctuation (CJK and Latin), then commas, and
//! finally character-level slicing. Adjacent chunks share up to `overlap`
//! trailing characters of context.
//!
//! Used standalone for plain text and as the second stage after
//! [`crate::split_markdown`] for markdown sections. All lengths are
//! measured in Unicode scalar values, never bytes — CJK text must count
//! one per character.

use std::collections::VecDeque;

use anyhow::{bail, Result};

/// Separator priority used when the caller does not supply one:
/// paragraph break, line break, sentence-ending punctuation (CJK, then
/// Latin), comma, character-level fallback.
pub fn default_separators() -> Vec<String> {
    [
        "\n\n", "\n", "。", "？", "！", "；", ". ", "? ", "! ", "，", ",", "",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Split `text` into chunks of at most `chunk_size` characters, with up to
/// `overlap` characters of trailing context repeated at each boundary.
///
/// Chunks are trimmed and never empty. The only way a chunk can exceed
/// `chunk_size` is an indivisible unit, which cannot survive past the
/// character-level fallback.
pub fn split_text(
    text: &str,
    chunk_size: usize,
    overlap: usize,
    separators: &[String],
) -> Result<Vec<String>> {
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

    let chunks = split_recursive(text, chunk_size, overlap, separators);
    Ok(chunks
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect())
}

fn split_recursive(
    text: &str,
    chunk_size: usize,
    overlap: usize,
    separators: &[String],
) -> Vec<String> {
    let Some((sep, rest)) = separators.split_first() else {
        return slice_chars(text, chunk_size, overlap);
    };
    if sep.is_empty() {
        return slice_chars(text, chunk_size, overlap);
    }

    let parts: Vec<&str> = text
        .split(sep.as_str())
        .filter(|p| !p.is_empty())
        .collect();

    let mut out = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for part in parts {
        if char_len(part) > chunk_size {
            // Flush the fitting parts gathered so far, then descend into
            // the oversized part with the next separator in the list.
            if !run.is_empty() {
                out.extend(merge_parts(&run, sep, chunk_size, overlap));
                run.clear();
            }
            out.extend(split_recursive(part, chunk_size, overlap, rest));
        } else {
            run.push(part);
        }
    }
    if !run.is_empty() {
        out.extend(merge_parts(&run, sep, chunk_size, overlap));
    }
    out
}

/// Greedily pack parts into chunks, rejoining with the separator they were
/// split on. When a chunk closes, the next one is seeded with the maximal
/// suffix of its parts whose joined length fits the overlap budget; the
/// seed is drained further if the incoming part would still not fit.
fn merge_parts(parts: &[&str], sep: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let sep_len = char_len(sep);
    let mut chunks = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    // Joined char length of `window`, including separators.
    let mut total = 0usize;

    for &part in parts {
        let part_len = char_len(part);
        let sep_cost = if window.is_empty() { 0 } else { sep_len };
        if total + sep_cost + part_len > chunk_size && !window.is_empty() {
            chunks.push(join(&window, sep));
            // total > 0 implies the window is non-empty.
            while total > overlap || (total > 0 && total + sep_len + part_len > chunk_size) {
                let front = window.pop_front().expect("window is non-empty");
                let front_cost = if window.is_empty() { 0 } else { sep_len };
                total -= char_len(front) + front_cost;
            }
        }
        window.push_back(part);
        if window.len() > 1 {
            total += sep_len;
        }
        total += part_len;
    }
    if !window.is_empty() {
        chunks.push(join(&window, sep));
    }
    chunks
}

/// Hard character-count slicing: windows of `chunk_size` chars advancing by
/// `chunk_size - overlap`, so exactly `overlap` chars repeat per boundary.
fn slice_chars(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + chunk_size).min(chars.len());
        out.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start = end - overlap;
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn join(window: &VecDeque<&str>, sep: &str) -> String {
    window.iter().copied().collect::<Vec<_>>().join(sep)
}
