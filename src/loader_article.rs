//! Article corpus loader.
//!
//! An article corpus is a directory with an `index.yaml` of the shape
//! `articles: [{file: relative/path.md, <arbitrary metadata>...}]`. Each
//! referenced file is read as UTF-8 markdown. Per-entry problems (a
//! malformed entry, a missing file) are logged and skipped; a missing
//! index file means the corpus has zero articles, which is not an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::Metadata;

/// One successfully loaded article: its markdown text plus the full index
/// entry as ordered metadata (including the `file` field).
#[derive(Debug, Clone)]
pub struct LoadedArticle {
    pub path: PathBuf,
    pub text: String,
    pub metadata: Metadata,
}

#[derive(Debug, Deserialize, Default)]
struct ArticleIndex {
    #[serde(default)]
    articles: Vec<serde_yaml::Value>,
}

/// Load every resolvable article listed in `<dir>/index.yaml`.
pub fn load_articles(dir: &Path) -> Result<Vec<LoadedArticle>> {
    let index_path = dir.join("index.yaml");
    if !index_path.is_file() {
        info!(path = %index_path.display(), "no article index, skipping articles");
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(&index_path)
        .with_context(|| format!("failed to read article index: {}", index_path.display()))?;
    let index: ArticleIndex = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse article index: {}", index_path.display()))?;

    let mut articles = Vec::new();
    for entry in index.articles {
        let Some(metadata) = entry_metadata(&entry) else {
            warn!("skipping malformed article index entry: {:?}", entry);
            continue;
        };
        let Some(file) = metadata.get("file").and_then(|v| v.as_str()) else {
            warn!("skipping article index entry without a 'file' key");
            continue;
        };

        let path = dir.join(file);
        if !path.is_file() {
            warn!(path = %path.display(), "article file not found, skipping");
            continue;
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read article file: {}", path.display()))?;
        articles.push(LoadedArticle {
            path,
            text,
            metadata,
        });
    }
    Ok(articles)
}

/// Convert an index entry into ordered metadata. Returns `None` when the
/// entry is not a mapping with string keys and JSON-representable values.
fn entry_metadata(entry: &serde_yaml::Value) -> Option<Metadata> {
    let mapping = entry.as_mapping()?;
    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = key.as_str()?;
        let value = serde_json::to_value(value).ok()?;
        metadata.insert(key.to_string(), value);
    }
    Some(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_listed_articles_with_metadata() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("faith.md"), "# Faith\nbody").unwrap();
        fs::write(
            tmp.path().join("index.yaml"),
            "articles:\n  - file: faith.md\n    author: anon\n    tags: [hope]\n",
        )
        .unwrap();

        let articles = load_articles(tmp.path()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].text, "# Faith\nbody");
        assert_eq!(articles[0].metadata["file"], "faith.md");
        assert_eq!(articles[0].metadata["author"], "anon");
        assert_eq!(articles[0].metadata["tags"][0], "hope");
    }

    #[test]
    fn skips_malformed_and_missing_entries() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("good.md"), "content").unwrap();
        fs::write(
            tmp.path().join("index.yaml"),
            concat!(
                "articles:\n",
                "  - just-a-string\n",
                "  - title: no file key\n",
                "  - file: missing.md\n",
                "  - file: good.md\n",
            ),
        )
        .unwrap();

        let articles = load_articles(tmp.path()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].metadata["file"], "good.md");
    }

    #[test]
    fn missing_index_means_zero_articles() {
        let tmp = tempfile::TempDir::new().unwrap();
        let articles = load_articles(tmp.path()).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn index_without_articles_key_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("index.yaml"), "{}\n").unwrap();
        let articles = load_articles(tmp.path()).unwrap();
        assert!(articles.is_empty());
    }
}
