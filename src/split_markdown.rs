//! Markdown section splitter keyed on a heading hierarchy.
//!
//! Scans markdown line by line, tracking the most recent heading seen at
//! each configured level. Each heading line closes the current section and
//! updates the hierarchy; everything else accumulates as section content.
//! A section's `header_path` reflects all ancestor headings in scope, not
//! just the nearest one.

use crate::models::MarkdownSection;

/// One configured heading level: the literal marker (`#`, `##`, …) and the
/// metadata field name it maps to.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    pub marker: String,
    pub field: String,
}

impl HeaderRule {
    pub fn new(marker: &str, field: &str) -> Self {
        Self {
            marker: marker.to_string(),
            field: field.to_string(),
        }
    }
}

/// The hierarchy used when the caller does not supply one:
/// `#` is the article title, `##` a section heading.
pub fn default_header_rules() -> Vec<HeaderRule> {
    vec![HeaderRule::new("#", "title"), HeaderRule::new("##", "section")]
}

/// Split markdown into ordered sections along the configured heading levels.
///
/// A section is emitted when its content is non-empty or any heading is in
/// scope; heading levels deeper than the new heading are cleared when the
/// hierarchy changes. Heading markers not present in `rules` are ordinary
/// content.
pub fn split_sections(text: &str, rules: &[HeaderRule]) -> Vec<MarkdownSection> {
    let mut sections = Vec::new();
    let mut titles: Vec<Option<String>> = vec![None; rules.len()];
    let mut content_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        match match_header(line, rules) {
            Some((level, title)) => {
                flush_section(&mut sections, &mut content_lines, &titles, rules);
                titles[level] = Some(title);
                for deeper in titles[level + 1..].iter_mut() {
                    *deeper = None;
                }
            }
            None => content_lines.push(line),
        }
    }
    flush_section(&mut sections, &mut content_lines, &titles, rules);
    sections
}

/// Match a line against the configured markers. A heading is the marker
/// alone or the marker followed by a space; `## x` therefore never matches
/// the `#` rule.
fn match_header(line: &str, rules: &[HeaderRule]) -> Option<(usize, String)> {
    let stripped = line.trim();
    for (level, rule) in rules.iter().enumerate() {
        if stripped == rule.marker {
            return Some((level, String::new()));
        }
        if let Some(tail) = stripped.strip_prefix(&rule.marker) {
            if let Some(title) = tail.strip_prefix(' ') {
                return Some((level, title.trim().to_string()));
            }
        }
    }
    None
}

fn flush_section(
    sections: &mut Vec<MarkdownSection>,
    content_lines: &mut Vec<&str>,
    titles: &[Option<String>],
    rules: &[HeaderRule],
) {
    let content = content_lines.join("\n").trim().to_string();
    content_lines.clear();

    let header_path: Vec<(String, String)> = rules
        .iter()
        .zip(titles)
        .filter_map(|(rule, title)| {
            title
                .as_ref()
                .map(|t| (rule.field.clone(), t.clone()))
        })
        .collect();

    if !content.is_empty() || !header_path.is_empty() {
        sections.push(MarkdownSection {
            content,
            header_path,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(f, t)| (f.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn splits_on_title_and_section() {
        let sections = split_sections("# T\nintro\n## S\nbody", &default_header_rules());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "intro");
        assert_eq!(sections[0].header_path, path(&[("title", "T")]));
        assert_eq!(sections[1].content, "body");
        assert_eq!(
            sections[1].header_path,
            path(&[("title", "T"), ("section", "S")])
        );
    }

    #[test]
    fn new_title_clears_deeper_levels() {
        let text = "# A\n## S1\nx\n# B\ny";
        let sections = split_sections(text, &default_header_rules());
        // "## S1" closes an empty section under A (headers in scope), then
        // "# B" resets the section level entirely.
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[0].header_path, path(&[("title", "A")]));
        assert_eq!(sections[1].content, "x");
        assert_eq!(
            sections[1].header_path,
            path(&[("title", "A"), ("section", "S1")])
        );
        assert_eq!(sections[2].content, "y");
        assert_eq!(sections[2].header_path, path(&[("title", "B")]));
    }

    #[test]
    fn headerless_text_is_one_section() {
        let sections = split_sections("just\ntext", &default_header_rules());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "just\ntext");
        assert!(sections[0].header_path.is_empty());
    }

    #[test]
    fn header_only_document() {
        let sections = split_sections("# Lonely", &default_header_rules());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[0].header_path, path(&[("title", "Lonely")]));
    }

    #[test]
    fn unconfigured_levels_are_content() {
        let text = "# T\n### deep heading\nbody";
        let sections = split_sections(text, &default_header_rules());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "### deep heading\nbody");
    }

    #[test]
    fn marker_without_space_is_content() {
        let sections = split_sections("#hashtag\ntext", &default_header_rules());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "#hashtag\ntext");
        assert!(sections[0].header_path.is_empty());
    }

    #[test]
    fn empty_input_yields_no_sections() {
        assert!(split_sections("", &default_header_rules()).is_empty());
        assert!(split_sections("\n\n", &default_header_rules()).is_empty());
    }

    #[test]
    fn sections_preserve_source_order() {
        let text = "# A\none\n## B\ntwo\n## C\nthree";
        let sections = split_sections(text, &default_header_rules());
        let contents: Vec<&str> = sections.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }
}
