//! Locating the front matter block of a markdown document
//!
//! The block is found textually rather than by parsing YAML: the document
//! must open with a `---` line, and the next `---` line closes it. Offsets
//! into the original text are kept so the rewriter can splice a new tag list
//! in without touching any other byte.

use std::ops::Range;

/// The delimiter line opening and closing a front matter block
pub const DELIMITER: &str = "---";

/// Line terminator used by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style line endings (\n)
    #[default]
    Lf,
    /// Windows-style line endings (\r\n)
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A located front matter block, borrowing the document it was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    text: &'a str,
    header_start: usize,
    header_end: usize,
    body_start: usize,
    line_ending: LineEnding,
}

impl<'a> Frontmatter<'a> {
    /// Text between the opening and closing delimiter lines, verbatim
    pub fn header(&self) -> &'a str {
        &self.text[self.header_start..self.header_end]
    }

    /// Everything after the closing delimiter line
    pub fn body(&self) -> &'a str {
        &self.text[self.body_start..]
    }

    /// Byte range of the header within the whole document
    pub fn header_range(&self) -> Range<usize> {
        self.header_start..self.header_end
    }

    /// Line ending of the opening delimiter, reused for inserted lines
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

/// One line of text starting at a byte offset
struct Line<'a> {
    content: &'a str,
    next: usize,
    terminated: bool,
    crlf: bool,
}

fn line_at(text: &str, start: usize) -> Line<'_> {
    match text[start..].find('\n') {
        Some(offset) => {
            let end = start + offset;
            let raw = &text[start..end];
            let content = raw.strip_suffix('\r').unwrap_or(raw);
            Line {
                content,
                next: end + 1,
                terminated: true,
                crlf: content.len() != raw.len(),
            }
        }
        None => Line {
            content: &text[start..],
            next: text.len(),
            terminated: false,
            crlf: false,
        },
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches([' ', '\t']) == DELIMITER
}

/// Find the front matter block at the start of `text`.
///
/// Returns `None` when the first line is not a delimiter or no closing
/// delimiter follows; the whole text is then body.
pub fn locate(text: &str) -> Option<Frontmatter<'_>> {
    let opening = line_at(text, 0);
    if !opening.terminated || !is_delimiter(opening.content) {
        return None;
    }

    let header_start = opening.next;
    let mut pos = header_start;
    while pos < text.len() {
        let line = line_at(text, pos);
        if is_delimiter(line.content) {
            return Some(Frontmatter {
                text,
                header_start,
                header_end: pos,
                body_start: line.next,
                line_ending: if opening.crlf {
                    LineEnding::CrLf
                } else {
                    LineEnding::Lf
                },
            });
        }
        pos = line.next;
    }

    None
}

/// Line ending to use for a document, whether or not it has front matter
pub fn detect_line_ending(text: &str) -> LineEnding {
    match text.find('\n') {
        Some(idx) if text[..idx].ends_with('\r') => LineEnding::CrLf,
        _ => LineEnding::Lf,
    }
}
