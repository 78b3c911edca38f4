use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChunkingConfig {
    #[serde(default)]
    pub bible: BibleChunkingConfig,
    #[serde(default)]
    pub article: ArticleChunkingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BibleChunkingConfig {
    #[serde(default = "default_bible_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_bible_overlap")]
    pub overlap: usize,
}

impl Default for BibleChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_bible_chunk_size(),
            overlap: default_bible_overlap(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArticleChunkingConfig {
    #[serde(default = "default_article_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_article_overlap")]
    pub overlap: usize,
}

impl Default for ArticleChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_article_chunk_size(),
            overlap: default_article_overlap(),
        }
    }
}

fn default_bible_chunk_size() -> usize {
    400
}
fn default_bible_overlap() -> usize {
    50
}
fn default_article_chunk_size() -> usize {
    500
}
fn default_article_overlap() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Bible version directories, processed in configured order.
    #[serde(default)]
    pub bible_versions: Vec<PathBuf>,
    #[serde(default = "default_articles_dir")]
    pub articles_dir: PathBuf,
    /// Filename globs that select book files inside a version directory.
    #[serde(default = "default_book_globs")]
    pub book_globs: Vec<String>,
}

fn default_articles_dir() -> PathBuf {
    PathBuf::from("./data/articles")
}

fn default_book_globs() -> Vec<String> {
    vec!["*.json".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./build/data.jsonl")
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate chunking: overlap >= chunk_size would make the sliding
    // windows meaningless, so it is rejected here rather than guessed at.
    for (name, chunk_size, overlap) in [
        (
            "chunking.bible",
            config.chunking.bible.chunk_size,
            config.chunking.bible.overlap,
        ),
        (
            "chunking.article",
            config.chunking.article.chunk_size,
            config.chunking.article.overlap,
        ),
    ] {
        if chunk_size == 0 {
            anyhow::bail!("{name}.chunk_size must be > 0");
        }
        if overlap >= chunk_size {
            anyhow::bail!("{name}.overlap must be smaller than {name}.chunk_size");
        }
    }

    if config.data.book_globs.is_empty() {
        anyhow::bail!("data.book_globs must not be empty");
    }

    Ok(config)
}
