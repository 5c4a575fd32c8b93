//! Tag normalization and merging
//!
//! Suggested tags end up as lowercase, hyphen-separated words. `/` survives
//! so nested tags (`graph/bfs`) keep their hierarchy, and `+`, `#` and `.`
//! inside a word survive so `c++`, `c#` and `node.js` stay distinct. Tags
//! already written in a document are kept exactly as they are. A merged
//! list is a set kept in ascending byte order.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Runs of anything that cannot appear inside a tag word
fn separator_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"[^\p{Alphabetic}\p{N}/+#.]+").expect("separator regex is valid")
    })
}

/// Normalize a raw tag string.
///
/// Lowercases and turns every run of whitespace, underscores or other
/// punctuation into a single `-`. In every `/` segment, leading `#` and `-`
/// and trailing `-` and `.` are trimmed. Returns `None` when nothing is left.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    let hyphenated = separator_regex().replace_all(&lowered, "-");

    let segments: Vec<&str> = hyphenated
        .split('/')
        .map(|segment| {
            segment
                .trim_start_matches(['#', '-'])
                .trim_end_matches(['-', '.'])
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// A sorted, duplicate-free list of tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize, dedupe and sort raw tag strings
    pub fn from_raw<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = tags
            .into_iter()
            .filter_map(|tag| normalize_tag(tag.as_ref()))
            .collect();
        Self(set.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for TagList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Union existing tags with incoming ones.
///
/// Existing tags are kept byte for byte; only blank ones are dropped.
/// Incoming tags are normalized, and skipped when an existing tag already
/// normalizes to the same value, so an existing `Hash Map` absorbs an
/// incoming `hash-map`.
pub fn merge<E, I>(existing: E, incoming: I) -> TagList
where
    E: IntoIterator,
    E::Item: AsRef<str>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut merged: BTreeSet<String> = existing
        .into_iter()
        .map(|tag| tag.as_ref().to_string())
        .filter(|tag| !tag.trim().is_empty())
        .collect();
    let known: BTreeSet<String> = merged.iter().filter_map(|tag| normalize_tag(tag)).collect();

    for tag in incoming.into_iter().filter_map(|tag| normalize_tag(tag.as_ref())) {
        if !known.contains(&tag) {
            merged.insert(tag);
        }
    }

    TagList(merged.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_table() {
        let cases = [
            ("Binary  Search", Some("binary-search")),
            ("binary-search", Some("binary-search")),
            ("  Dynamic Programming ", Some("dynamic-programming")),
            ("#Two_Pointers", Some("two-pointers")),
            ("--sliding--window--", Some("sliding-window")),
            ("Depth-First Search (DFS)", Some("depth-first-search-dfs")),
            ("graph/BFS", Some("graph/bfs")),
            ("/graph//bfs/", Some("graph/bfs")),
            ("a - / b", Some("a/b")),
            ("Ünïcode Tag", Some("ünïcode-tag")),
            ("2-sum", Some("2-sum")),
            ("C++", Some("c++")),
            ("C#", Some("c#")),
            ("Node.js", Some("node.js")),
            ("end.", Some("end")),
            ("##", None),
            ("   ", None),
            ("", None),
            ("!!!", None),
            ("-/-", None),
        ];

        for (raw, expected) in cases {
            assert_eq!(normalize_tag(raw).as_deref(), expected, "normalizing {raw:?}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "Binary  Search",
            "#Two_Pointers",
            "graph/BFS",
            "Depth-First Search (DFS)",
            "C++",
        ] {
            let once = normalize_tag(raw).unwrap();
            assert_eq!(normalize_tag(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn test_merge_union() {
        let merged = merge(["array", "dp"], ["dp", "two-pointers"]);
        assert_eq!(merged.as_slice(), ["array", "dp", "two-pointers"]);
    }

    #[test]
    fn test_merge_keeps_existing_verbatim() {
        let merged = merge(["c++", "c#", "Node.js", "Hash Map"], ["C", "hash map", "node.js"]);
        assert_eq!(merged.as_slice(), ["Hash Map", "Node.js", "c", "c#", "c++"]);
    }

    #[test]
    fn test_merge_without_incoming_keeps_existing() {
        let merged = merge(["Two Pointers", "array", "array"], Vec::<String>::new());
        assert_eq!(merged.as_slice(), ["Two Pointers", "array"]);
    }

    #[test]
    fn test_merge_normalized_duplicates_collapse() {
        let merged = merge(["binary-search"], ["Binary  Search", "BINARY_SEARCH"]);
        assert_eq!(merged.as_slice(), ["binary-search"]);
    }

    #[test]
    fn test_merge_sorts_by_bytes() {
        let merged = merge(Vec::<String>::new(), ["trie", "Array", "2-sum", "heap"]);
        assert_eq!(merged.as_slice(), ["2-sum", "array", "heap", "trie"]);
    }

    #[test]
    fn test_merge_idempotence_laws() {
        let existing = ["Hash Map", "array"];
        let incoming = ["dp", "Two Sum"];

        let once = merge(existing, incoming);
        let again = merge(once.iter(), Vec::<String>::new());
        assert_eq!(again, once);

        let doubled = merge(existing, incoming.iter().chain(incoming.iter()));
        assert_eq!(doubled, once);
    }

    #[test]
    fn test_merge_empty_inputs() {
        let merged = merge(Vec::<String>::new(), Vec::<String>::new());
        assert!(merged.is_empty());

        let merged = merge(["  ", ""], ["?"]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_tag_list_contains() {
        let tags = TagList::from_raw(["b", "a", "c"]);
        assert!(tags.contains("b"));
        assert!(!tags.contains("d"));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_tag_list_serializes_as_array() {
        let tags = TagList::from_raw(["dp", "array"]);
        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["array","dp"]"#);
    }
}
