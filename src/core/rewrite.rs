//! Writing a merged tag list back into document text
//!
//! Only the span picked by the parser is replaced; the rest of the header
//! and the whole body are copied through untouched.

use crate::core::frontmatter::{detect_line_ending, Frontmatter, LineEnding, DELIMITER};
use crate::core::tag_block::{TagBlock, TagBlockShape, TAGS_KEY};
use crate::core::tags::TagList;
use std::borrow::Cow;

/// `  - tag` lines, each terminated by `eol`
fn list_lines(tags: &TagList, eol: LineEnding) -> String {
    let eol = eol.as_str();
    tags.iter()
        .map(|tag| format!("  - {}{eol}", yaml_scalar(tag)))
        .collect()
}

/// The tag as a plain scalar, or double quoted when YAML would misread it
fn yaml_scalar(tag: &str) -> Cow<'_, str> {
    let needs_quotes = tag.starts_with(|c: char| "[]{}&*!|>'\"%@`,?:-#".contains(c))
        || tag.ends_with(':')
        || tag.contains(": ")
        || tag.contains(" #")
        || tag.trim() != tag;
    if !needs_quotes {
        return Cow::Borrowed(tag);
    }
    let escaped = tag.replace('\\', "\\\\").replace('"', "\\\"");
    Cow::Owned(format!("\"{escaped}\""))
}

/// The `tags:` key followed by one list line per tag, every line terminated
pub fn serialize_tags(tags: &TagList, eol: LineEnding) -> String {
    format!("{TAGS_KEY}{}{}", eol.as_str(), list_lines(tags, eol))
}

/// Produce the new document text with `merged` written into the tag block.
///
/// `frontmatter` is the located header of `text` (or `None` when it has
/// none) and `block` the parse of that header. An empty `merged` list
/// leaves the text unchanged.
pub fn rewrite(
    text: &str,
    frontmatter: Option<&Frontmatter<'_>>,
    block: &TagBlock,
    merged: &TagList,
) -> String {
    if merged.is_empty() {
        return text.to_string();
    }

    let Some(frontmatter) = frontmatter else {
        let eol = detect_line_ending(text);
        return format!(
            "{DELIMITER}{e}{tags}{DELIMITER}{e}{text}",
            e = eol.as_str(),
            tags = serialize_tags(merged, eol),
        );
    };

    let eol = frontmatter.line_ending();
    let header = frontmatter.header();
    let span = block.span;
    let needs_break = span.start > 0 && !header[..span.start].ends_with('\n');

    let replacement = match block.shape {
        TagBlockShape::Absent => {
            let mut inserted = String::new();
            if needs_break {
                inserted.push_str(eol.as_str());
            }
            inserted.push_str(&serialize_tags(merged, eol));
            inserted
        }
        TagBlockShape::EmptyBlock => {
            let mut inserted = String::new();
            if needs_break {
                inserted.push_str(eol.as_str());
            }
            inserted.push_str(&list_lines(merged, eol));
            inserted
        }
        // the key line's own terminator stays outside the span
        TagBlockShape::EmptyInline | TagBlockShape::Inline => {
            let serialized = serialize_tags(merged, eol);
            serialized
                .strip_suffix(eol.as_str())
                .unwrap_or(&serialized)
                .to_string()
        }
        TagBlockShape::Populated => {
            let lines = list_lines(merged, eol);
            if header[span.range()].ends_with('\n') {
                lines
            } else {
                lines
                    .strip_suffix(eol.as_str())
                    .unwrap_or(&lines)
                    .to_string()
            }
        }
    };

    let target = span.offset(frontmatter.header_range().start);
    let mut output = String::with_capacity(text.len() + replacement.len());
    output.push_str(&text[..target.start]);
    output.push_str(&replacement);
    output.push_str(&text[target.end..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frontmatter::locate;
    use crate::core::tag_block::parse;
    use crate::core::tags::merge;
    use pretty_assertions::assert_eq;

    fn rewrite_with(text: &str, tags: &[&str]) -> String {
        let frontmatter = locate(text);
        let block = frontmatter
            .as_ref()
            .map(|fm| parse(fm.header()))
            .unwrap_or_else(TagBlock::absent);
        let merged = merge(&block.existing, tags);
        rewrite(text, frontmatter.as_ref(), &block, &merged)
    }

    #[test]
    fn test_serialize_tags() {
        let tags = TagList::from_raw(["y", "x"]);
        assert_eq!(serialize_tags(&tags, LineEnding::Lf), "tags:\n  - x\n  - y\n");
        assert_eq!(
            serialize_tags(&tags, LineEnding::CrLf),
            "tags:\r\n  - x\r\n  - y\r\n"
        );
    }

    #[test]
    fn test_yaml_scalar_quotes_when_needed() {
        assert_eq!(yaml_scalar("c#"), "c#");
        assert_eq!(yaml_scalar("Hash Map"), "Hash Map");
        assert_eq!(yaml_scalar("note: hard"), "\"note: hard\"");
        assert_eq!(yaml_scalar("#1"), "\"#1\"");
        assert_eq!(yaml_scalar("say \"hi\" #x"), "\"say \\\"hi\\\" #x\"");
    }

    #[test]
    fn test_rewrite_inline_keeps_trailing_comment() {
        let text = "---\ntags: [dp] # from the editorial\nlink: l\n---\nbody\n";
        let rewritten = rewrite_with(text, &["greedy"]);
        assert_eq!(
            rewritten,
            "---\ntags:\n  - dp\n  - greedy # from the editorial\nlink: l\n---\nbody\n"
        );
        let header = locate(&rewritten).unwrap().header().to_string();
        let yaml: serde_yaml::Value = serde_yaml::from_str(&header).unwrap();
        assert_eq!(yaml["tags"][1].as_str(), Some("greedy"));
        assert_eq!(yaml["link"].as_str(), Some("l"));
    }

    #[test]
    fn test_rewrite_block_scalar() {
        let text = "---\ntags: >-\n  dynamic\n  programming\nlink: l\n---\nbody\n";
        let rewritten = rewrite_with(text, &["memoization"]);
        assert_eq!(
            rewritten,
            "---\ntags:\n  - dynamic programming\n  - memoization\nlink: l\n---\nbody\n"
        );
        let header = locate(&rewritten).unwrap().header().to_string();
        let yaml: serde_yaml::Value = serde_yaml::from_str(&header).unwrap();
        assert_eq!(yaml["tags"].as_sequence().map(Vec::len), Some(2));
    }

    #[test]
    fn test_rewrite_without_header() {
        let text = "# Two Sum\n\n```python\npass\n```\n";
        assert_eq!(
            rewrite_with(text, &["array"]),
            format!("---\ntags:\n  - array\n---\n{text}")
        );
    }

    #[test]
    fn test_rewrite_absent_key() {
        let text = "---\ntitle: Two Sum\n---\nbody\n";
        assert_eq!(
            rewrite_with(text, &["y", "x"]),
            "---\ntitle: Two Sum\ntags:\n  - x\n  - y\n---\nbody\n"
        );
    }

    #[test]
    fn test_rewrite_absent_key_empty_header() {
        let text = "---\n---\nbody";
        assert_eq!(rewrite_with(text, &["x"]), "---\ntags:\n  - x\n---\nbody");
    }

    #[test]
    fn test_rewrite_empty_inline() {
        let text = "---\ntitle: t\ntags: []\nlink: l\n---\nbody\n";
        assert_eq!(
            rewrite_with(text, &["greedy"]),
            "---\ntitle: t\ntags:\n  - greedy\nlink: l\n---\nbody\n"
        );
    }

    #[test]
    fn test_rewrite_empty_block() {
        let text = "---\ntags:\nlink: l\n---\nbody\n";
        assert_eq!(
            rewrite_with(text, &["y", "x"]),
            "---\ntags:\n  - x\n  - y\nlink: l\n---\nbody\n"
        );
    }

    #[test]
    fn test_rewrite_populated() {
        let text = "---\ntags:\n  - array\n  - hash-map\ndate: 2024-01-01\n---\nbody\n";
        assert_eq!(
            rewrite_with(text, &["hash-map", "two-sum"]),
            "---\ntags:\n  - array\n  - hash-map\n  - two-sum\ndate: 2024-01-01\n---\nbody\n"
        );
    }

    #[test]
    fn test_rewrite_inline_list() {
        let text = "---\ntags: [Array, dp]\n---\nbody";
        assert_eq!(
            rewrite_with(text, &["greedy"]),
            "---\ntags:\n  - Array\n  - dp\n  - greedy\n---\nbody"
        );
    }

    #[test]
    fn test_rewrite_empty_merge_is_noop() {
        let text = "---\ntags: []\n---\nbody";
        assert_eq!(rewrite_with(text, &[]), text);
        assert_eq!(rewrite_with("no header", &["  "]), "no header");
    }

    #[test]
    fn test_rewrite_keeps_crlf() {
        let text = "---\r\ntitle: t\r\ntags: []\r\n---\r\nbody\r\n";
        assert_eq!(
            rewrite_with(text, &["dp"]),
            "---\r\ntitle: t\r\ntags:\r\n  - dp\r\n---\r\nbody\r\n"
        );

        let bare = "line one\r\nline two\r\n";
        assert_eq!(
            rewrite_with(bare, &["dp"]),
            format!("---\r\ntags:\r\n  - dp\r\n---\r\n{bare}")
        );
    }
}
