//! Document representation tying the tag pipeline together
//!
//! A `Document` borrows the raw markdown text and remembers where its front
//! matter and tag block are. Applying tags never mutates it; it produces a
//! [`TagUpdate`] carrying the complete new text.

use crate::core::frontmatter::{locate, Frontmatter};
use crate::core::rewrite::rewrite;
use crate::core::tag_block::{parse, TagBlock, TagBlockShape};
use crate::core::tags::{merge, TagList};
use log::{debug, info};

/// A markdown document with its front matter located and tags decoded
#[derive(Debug, Clone)]
pub struct Document<'a> {
    text: &'a str,
    frontmatter: Option<Frontmatter<'a>>,
    tag_block: TagBlock,
}

/// Result of merging tags into a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUpdate {
    /// The full new document text
    pub content: String,
    /// Shape of the tag block before the update
    pub shape: TagBlockShape,
    /// The merged tag list now in the document
    pub tags: TagList,
    /// Whether `content` differs from the input text
    pub changed: bool,
    /// Whether a front matter block had to be created
    pub header_created: bool,
}

impl<'a> Document<'a> {
    /// Locate the front matter and parse its tag block
    pub fn parse(text: &'a str) -> Self {
        let frontmatter = locate(text);
        let tag_block = match &frontmatter {
            Some(fm) => parse(fm.header()),
            None => TagBlock::absent(),
        };
        Self {
            text,
            frontmatter,
            tag_block,
        }
    }

    pub fn has_front_matter(&self) -> bool {
        self.frontmatter.is_some()
    }

    /// Raw header text between the delimiters
    pub fn header(&self) -> Option<&'a str> {
        self.frontmatter.as_ref().map(Frontmatter::header)
    }

    /// Everything after the front matter, or the whole text without one
    pub fn body(&self) -> &'a str {
        match &self.frontmatter {
            Some(fm) => fm.body(),
            None => self.text,
        }
    }

    pub fn tag_block(&self) -> &TagBlock {
        &self.tag_block
    }

    pub fn shape(&self) -> TagBlockShape {
        self.tag_block.shape
    }

    /// Tags currently in the document, as written
    pub fn existing_tags(&self) -> TagList {
        merge(&self.tag_block.existing, std::iter::empty::<&str>())
    }

    /// Merge `incoming` into the document's tags and render the new text.
    ///
    /// When nothing in `incoming` is new to the document, the text is
    /// returned untouched, whatever shape or order its tags are in.
    pub fn apply_tags<I>(&self, incoming: I) -> TagUpdate
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tags = merge(&self.tag_block.existing, incoming);
        let adds_nothing = tags
            .iter()
            .all(|tag| self.tag_block.existing.iter().any(|e| e == tag));

        if adds_nothing {
            debug!("No new tags ({:?})", self.tag_block.shape);
            return TagUpdate {
                content: self.text.to_string(),
                shape: self.tag_block.shape,
                tags,
                changed: false,
                header_created: false,
            };
        }

        let header_created = self.frontmatter.is_none();
        if header_created {
            info!("No front matter found, creating one");
        }

        let content = rewrite(self.text, self.frontmatter.as_ref(), &self.tag_block, &tags);
        let changed = content != self.text;

        TagUpdate {
            content,
            shape: self.tag_block.shape,
            tags,
            changed,
            header_created,
        }
    }
}

/// Merge `incoming` tags into the front matter of `text`
pub fn apply_tags<I>(text: &str, incoming: I) -> TagUpdate
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Document::parse(text).apply_tags(incoming)
}
