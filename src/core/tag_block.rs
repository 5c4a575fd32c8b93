//! Finding and decoding the `tags:` entry inside a front matter header
//!
//! The header is scanned line by line for a top-level `tags:` key. The shape
//! of what follows decides how the rewriter updates it, and the returned
//! span marks the exact bytes of the header that the update replaces.

use std::ops::Range;

/// The top-level key holding the tag list
pub const TAGS_KEY: &str = "tags:";

/// How the tag list currently appears inside a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagBlockShape {
    /// No `tags:` key at all
    Absent,
    /// `tags: []`
    EmptyInline,
    /// `tags:` with no list items below it
    EmptyBlock,
    /// `tags:` followed by `  - value` lines
    Populated,
    /// `tags: [a, b]`, a scalar `tags: a` or a block scalar `tags: >-`
    Inline,
}

/// A byte range inside the header; empty spans are insertion points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn insertion(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Shift the span by `offset`, e.g. from header to document coordinates
    pub fn offset(&self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}

/// The decoded tag entry of a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBlock {
    pub shape: TagBlockShape,
    /// Raw tag strings as written, in document order
    pub existing: Vec<String>,
    /// Header bytes to replace when writing the merged list back
    pub span: TextSpan,
}

impl TagBlock {
    /// The block of a document that has no header at all
    pub fn absent() -> Self {
        Self {
            shape: TagBlockShape::Absent,
            existing: Vec::new(),
            span: TextSpan::insertion(0),
        }
    }
}

/// Parse the tag entry out of a header's text
pub fn parse(header: &str) -> TagBlock {
    let mut offset = 0;
    let mut lines = header
        .split_inclusive('\n')
        .map(|raw| {
            let start = offset;
            offset += raw.len();
            (start, raw)
        })
        .peekable();

    while let Some((start, raw)) = lines.next() {
        let content = strip_terminator(raw);
        let Some(rest) = content.strip_prefix(TAGS_KEY) else {
            continue;
        };
        let value = strip_comment(rest).trim();

        if value.is_empty() {
            let items_start = start + raw.len();
            let mut items_end = items_start;
            let mut existing = Vec::new();

            while let Some(&(item_start, item_raw)) = lines.peek() {
                let Some(item) = list_item(strip_terminator(item_raw)) else {
                    break;
                };
                if !item.is_empty() {
                    existing.push(item.to_string());
                }
                items_end = item_start + item_raw.len();
                lines.next();
            }

            return if items_end == items_start {
                TagBlock {
                    shape: TagBlockShape::EmptyBlock,
                    existing,
                    span: TextSpan::insertion(items_start),
                }
            } else {
                TagBlock {
                    shape: TagBlockShape::Populated,
                    existing,
                    span: TextSpan::new(items_start, items_end),
                }
            };
        }

        if is_block_scalar(value) {
            let mut end = start + content.len();
            let mut folded = Vec::new();
            while let Some(&(next_start, next_raw)) = lines.peek() {
                let next = strip_terminator(next_raw);
                let blank = next.trim().is_empty();
                if !blank && !next.starts_with([' ', '\t']) {
                    break;
                }
                if !blank {
                    folded.push(next.trim());
                    end = next_start + next.len();
                }
                lines.next();
            }
            let joined = folded.join(" ");
            return TagBlock {
                shape: TagBlockShape::Inline,
                existing: if joined.is_empty() { Vec::new() } else { vec![joined] },
                span: TextSpan::new(start, end),
            };
        }

        // a trailing comment stays in place after the rewritten list
        let value_end = TAGS_KEY.len() + strip_comment(rest).trim_end().len();
        let key_line = TextSpan::new(start, start + value_end);
        return match flow_items(value) {
            Some(inner) if inner.trim().is_empty() => TagBlock {
                shape: TagBlockShape::EmptyInline,
                existing: Vec::new(),
                span: key_line,
            },
            Some(inner) => TagBlock {
                shape: TagBlockShape::Inline,
                existing: split_inline(inner),
                span: key_line,
            },
            None => TagBlock {
                shape: TagBlockShape::Inline,
                existing: split_inline(value),
                span: key_line,
            },
        };
    }

    TagBlock {
        shape: TagBlockShape::Absent,
        existing: Vec::new(),
        span: TextSpan::insertion(header.len()),
    }
}

fn strip_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Cut a trailing YAML comment: a `#` at the start or after whitespace
fn strip_comment(text: &str) -> &str {
    let mut prev_is_space = true;
    for (idx, c) in text.char_indices() {
        if c == '#' && prev_is_space {
            return &text[..idx];
        }
        prev_is_space = c.is_whitespace();
    }
    text
}

/// The value of a `- value` list item line, or `None` for any other line
fn list_item(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(unquote(strip_comment(rest).trim()))
}

/// `|` or `>` with optional chomping and indentation indicators
fn is_block_scalar(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| c == '-' || c == '+' || c.is_ascii_digit())
}

fn flow_items(value: &str) -> Option<&str> {
    value.strip_prefix('[')?.strip_suffix(']')
}

fn split_inline(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
