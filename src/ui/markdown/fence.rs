//! Fenced block detection.
//!
//! Fences are found with a first-match-wins scan: the earliest opening
//! delimiter pairs with the next delimiter of the same kind, and scanning
//! resumes after the close. Blocks therefore never nest or overlap, and a
//! delimiter inside a claimed block can never open a new one. An opening
//! delimiter without a close is left alone as plain text.

use crate::core::buffer::TextSpan;

const DELIMITERS: [&str; 2] = ["```", "~~~"];

/// How the inner content of a fence is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FenceLanguage {
    Python,
    Markdown,
    /// Unknown or missing tag: background and copy action only.
    Generic,
}

impl FenceLanguage {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("python" | "py") => FenceLanguage::Python,
            Some("markdown" | "md") => FenceLanguage::Markdown,
            _ => FenceLanguage::Generic,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FencedBlock {
    /// Opening delimiter through the end of the closing delimiter.
    pub outer: TextSpan,
    /// Opening delimiter, plus the tag line when a line break follows it.
    pub opening: TextSpan,
    /// Lower-cased first word of the opening line, if any.
    pub language_tag: Option<String>,
    /// Content between the tag line and the closing delimiter.
    pub inner: TextSpan,
}

impl FencedBlock {
    pub fn language(&self) -> FenceLanguage {
        FenceLanguage::from_tag(self.language_tag.as_deref())
    }

    pub fn offset(mut self, by: usize) -> Self {
        self.outer = self.outer.offset(by);
        self.opening = self.opening.offset(by);
        self.inner = self.inner.offset(by);
        self
    }

    /// Text placed on the clipboard for this block. `text` is the same
    /// string the block was scanned from.
    pub fn payload(&self, text: &str) -> String {
        text.get(self.inner.as_range())
            .map(trim_block)
            .unwrap_or_default()
    }
}

/// Drops leading blank lines and all trailing whitespace, keeping the
/// indentation of the first code line.
pub fn trim_block(content: &str) -> String {
    let mut start = 0;
    for line in content.split_inclusive('\n') {
        if line.trim().is_empty() {
            start += line.len();
        } else {
            break;
        }
    }
    content[start..].trim_end().to_string()
}

/// Returns the fenced blocks of `text`, in order, with offsets relative to
/// the start of `text`.
pub fn scan_fences(text: &str) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some((open, delim)) = next_delimiter(text, pos) {
        let after_open = open + delim.len();
        let Some(close_rel) = text[after_open..].find(delim) else {
            break;
        };
        let close = after_open + close_rel;
        let between = &text[after_open..close];

        let (tag_line, opening, inner) = match between.find('\n') {
            Some(nl) => (
                &between[..nl],
                TextSpan::new(open, after_open + nl + 1),
                TextSpan::new(after_open + nl + 1, close),
            ),
            None => (
                between,
                TextSpan::new(open, after_open),
                TextSpan::new(close, close),
            ),
        };
        let language_tag = tag_line
            .split_whitespace()
            .next()
            .map(|t| t.to_lowercase());

        blocks.push(FencedBlock {
            outer: TextSpan::new(open, close + delim.len()),
            opening,
            language_tag,
            inner,
        });
        pos = close + delim.len();
    }

    blocks
}

/// Earliest delimiter at or after `from`.
fn next_delimiter(text: &str, from: usize) -> Option<(usize, &'static str)> {
    let rest = text.get(from..)?;
    DELIMITERS
        .iter()
        .filter_map(|d| rest.find(d).map(|i| (from + i, *d)))
        .min_by_key(|(at, _)| *at)
}
