use anyhow::Result;

use crate::config::Config;

/// Print each configured input with a health column, so a misconfigured
/// path is visible before a build is attempted.
pub fn list_sources(config: &Config) -> Result<()> {
    println!("{:<16} {:<12} PATH", "SOURCE", "STATUS");

    for dir in &config.data.bible_versions {
        let status = if dir.is_dir() { "OK" } else { "MISSING" };
        println!("{:<16} {:<12} {}", "bible", status, dir.display());
    }
    if config.data.bible_versions.is_empty() {
        println!("{:<16} {:<12} -", "bible", "NOT CONFIGURED");
    }

    let index_path = config.data.articles_dir.join("index.yaml");
    let status = if index_path.is_file() {
        "OK"
    } else {
        "NO INDEX"
    };
    println!("{:<16} {:<12} {}", "articles", status, index_path.display());

    Ok(())
}
