//! Heading-scoped content extraction
//!
//! Converts a fetched page into a flat text document organized by heading
//! ancestry. Walking the page in document order, each h1-h6 adjusts an
//! ordered heading stack: the stack is truncated to `level - 1` entries and
//! the new heading pushed, so the stack always holds the current nesting
//! ancestry and a same-level sibling replaces its predecessor rather than
//! nesting under it. Content elements (p, ul, span) attach to the section
//! named by the joined stack; content seen before any heading is dropped.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single extracted page, ready for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// The URL the content was extracted from
    pub webpage_url: String,

    /// Delimited heading-scoped sections, concatenated in discovery order
    pub text_chunk: String,
}

/// Ordered stack of heading texts reflecting nesting by heading level
#[derive(Debug, Clone, Default)]
pub struct HeadingPath {
    parts: Vec<String>,
}

impl HeadingPath {
    /// Drops entries beyond `depth`, discarding stale deeper ancestry
    pub fn truncate_to(&mut self, depth: usize) {
        self.parts.truncate(depth);
    }

    /// Pushes a heading text as the new deepest entry
    pub fn push(&mut self, heading: String) {
        self.parts.push(heading);
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The section key: stack entries joined with " - "
    pub fn key(&self) -> String {
        self.parts.join(" - ")
    }
}

/// Page content organized into heading-keyed sections, in first-seen order
#[derive(Debug, Default)]
pub struct OrganizedContent {
    sections: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl OrganizedContent {
    /// Registers a section key if unseen, with an empty content list
    fn register(&mut self, key: String) {
        if !self.index.contains_key(&key) {
            self.index.insert(key.clone(), self.sections.len());
            self.sections.push((key, Vec::new()));
        }
    }

    /// Appends a text block to the named section
    fn append(&mut self, key: &str, text: String) {
        match self.index.get(key) {
            Some(&i) => self.sections[i].1.push(text),
            None => {
                self.index.insert(key.to_string(), self.sections.len());
                self.sections.push((key.to_string(), vec![text]));
            }
        }
    }

    /// Iterates sections in the order their keys were first created
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(key, blocks)| (key.as_str(), blocks.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Content blocks for a section key, if present
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index.get(key).map(|&i| self.sections[i].1.as_slice())
    }
}

/// Organizes a page's text content under heading-path section keys
///
/// Only h1-h6, p, ul, and span elements are considered, in document order.
/// A page without the expected structure yields an empty or partial result,
/// never an error.
pub fn organize_content(html: &str) -> OrganizedContent {
    let document = Html::parse_document(html);
    let mut organized = OrganizedContent::default();

    let selector = match Selector::parse("h1, h2, h3, h4, h5, h6, p, ul, span") {
        Ok(s) => s,
        Err(_) => return organized,
    };

    let mut path = HeadingPath::default();

    for element in document.select(&selector) {
        match heading_level(element.value().name()) {
            Some(level) => {
                path.truncate_to(level - 1);
                path.push(normalized_text(&element));
                organized.register(path.key());
            }
            None => {
                // Content before the first heading has no section to live in.
                if !path.is_empty() {
                    organized.append(&path.key(), normalized_text(&element));
                }
            }
        }
    }

    organized
}

/// Renders organized content into the final delimited document
///
/// Each section becomes a "start" / heading path / blank line / content
/// lines / "end" block, concatenated in section order and trimmed. The
/// delimiters let downstream consumers split the flat text back into
/// per-section chunks.
pub fn build_document(organized: &OrganizedContent, url: &str) -> ExtractedDocument {
    let mut full_text = String::new();

    for (key, blocks) in organized.iter() {
        full_text.push_str("start\n");
        full_text.push_str(key);
        full_text.push_str("\n\n");
        full_text.push_str(&blocks.join("\n"));
        full_text.push_str("\nend\n\n");
    }

    ExtractedDocument {
        webpage_url: url.to_string(),
        text_chunk: full_text.trim().to_string(),
    }
}

/// Numeric level of a heading tag name, 1 through 6
fn heading_level(tag: &str) -> Option<usize> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Collects an element's text with whitespace collapsed and trimmed
fn normalized_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
