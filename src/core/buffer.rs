//! Addressable text storage for the transcript display.
//!
//! [`TextBuffer`] owns the raw characters shown in the response area and
//! nothing else: styling lives in the render engine as span lists layered
//! on top of byte ranges into this buffer. Offsets are byte offsets into the
//! UTF-8 content and must always fall on character boundaries.

use std::fmt;
use std::ops::Range;

/// Half-open byte range into a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    /// Builds a span, swapping the bounds if they arrive reversed.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn offset(self, by: usize) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for TextSpan {
    fn from(range: Range<usize>) -> Self {
        TextSpan::new(range.start, range.end)
    }
}

/// Errors raised when a caller addresses text that is not there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The span reaches past the end of the buffer.
    OutOfRange { span: TextSpan, len: usize },
    /// The offset splits a multi-byte character.
    NotCharBoundary { offset: usize },
    /// A line/column position that does not exist.
    NoSuchPosition { line: usize, column: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::OutOfRange { span, len } => write!(
                f,
                "span {}..{} is outside the buffer (length {})",
                span.start, span.end, len
            ),
            BufferError::NotCharBoundary { offset } => {
                write!(f, "offset {offset} is not on a character boundary")
            }
            BufferError::NoSuchPosition { line, column } => {
                write!(f, "no text at line {line}, column {column}")
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// Line-addressable text store.
///
/// Line and column numbers are zero-based; columns count characters, not
/// bytes, so `(line, column)` matches what a user sees in the widget.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    line_starts: Vec<usize>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            line_starts: vec![0],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Appends text at the end and returns the span it now occupies.
    pub fn append(&mut self, text: &str) -> TextSpan {
        let start = self.text.len();
        self.text.push_str(text);
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                self.line_starts.push(start + i + 1);
            }
        }
        TextSpan::new(start, self.text.len())
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<TextSpan, BufferError> {
        self.check_offset(offset)?;
        self.text.insert_str(offset, text);
        self.reindex();
        Ok(TextSpan::new(offset, offset + text.len()))
    }

    /// Removes the span and returns the removed text.
    pub fn delete(&mut self, span: TextSpan) -> Result<String, BufferError> {
        self.check_span(span)?;
        let removed: String = self.text.drain(span.as_range()).collect();
        self.reindex();
        Ok(removed)
    }

    /// Replaces the span with `replacement` and returns the new span.
    pub fn replace(&mut self, span: TextSpan, replacement: &str) -> Result<TextSpan, BufferError> {
        self.check_span(span)?;
        self.text.replace_range(span.as_range(), replacement);
        self.reindex();
        Ok(TextSpan::new(span.start, span.start + replacement.len()))
    }

    pub fn slice(&self, span: TextSpan) -> Result<&str, BufferError> {
        self.check_span(span)?;
        Ok(&self.text[span.as_range()])
    }

    /// Substring addressed by character offsets rather than bytes.
    pub fn slice_chars(&self, start: usize, end: usize) -> Result<&str, BufferError> {
        let span = TextSpan::new(self.char_to_byte(start)?, self.char_to_byte(end)?);
        self.slice(span)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.line_starts.clear();
        self.line_starts.push(0);
    }

    pub fn char_to_byte(&self, char_offset: usize) -> Result<usize, BufferError> {
        if char_offset == 0 {
            return Ok(0);
        }
        let mut seen = 0usize;
        for (byte, _) in self.text.char_indices() {
            if seen == char_offset {
                return Ok(byte);
            }
            seen += 1;
        }
        if seen == char_offset {
            Ok(self.text.len())
        } else {
            Err(BufferError::OutOfRange {
                span: TextSpan::new(char_offset, char_offset),
                len: self.text.chars().count(),
            })
        }
    }

    pub fn byte_to_char(&self, offset: usize) -> Result<usize, BufferError> {
        self.check_offset(offset)?;
        Ok(self.text[..offset].chars().count())
    }

    /// Byte offset of `(line, column)`, where column counts characters.
    pub fn offset_of(&self, line: usize, column: usize) -> Result<usize, BufferError> {
        let missing = BufferError::NoSuchPosition { line, column };
        let start = *self.line_starts.get(line).ok_or(missing.clone())?;
        let line_text = &self.text[start..self.line_end(line)];
        if column == line_text.chars().count() {
            return Ok(start + line_text.len());
        }
        line_text
            .char_indices()
            .nth(column)
            .map(|(byte, _)| start + byte)
            .ok_or(missing)
    }

    /// `(line, column)` of a byte offset.
    pub fn position_of(&self, offset: usize) -> Result<(usize, usize), BufferError> {
        self.check_offset(offset)?;
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };
        let column = self.text[self.line_starts[line]..offset].chars().count();
        Ok((line, column))
    }

    /// Text of one line without its trailing newline.
    pub fn line(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line)?;
        Some(&self.text[start..self.line_end(line)])
    }

    fn line_end(&self, line: usize) -> usize {
        self.line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len())
    }

    fn check_offset(&self, offset: usize) -> Result<(), BufferError> {
        if offset > self.text.len() {
            return Err(BufferError::OutOfRange {
                span: TextSpan::new(offset, offset),
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(BufferError::NotCharBoundary { offset });
        }
        Ok(())
    }

    fn check_span(&self, span: TextSpan) -> Result<(), BufferError> {
        if span.end > self.text.len() {
            return Err(BufferError::OutOfRange {
                span,
                len: self.text.len(),
            });
        }
        self.check_offset(span.start)?;
        self.check_offset(span.end)
    }

    fn reindex(&mut self) {
        self.line_starts.clear();
        self.line_starts.push(0);
        for (i, b) in self.text.bytes().enumerate() {
            if b == b'\n' {
                self.line_starts.push(i + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_tracks_lines() {
        let mut buffer = TextBuffer::new();
        let span = buffer.append("one\ntwo\n");
        assert_eq!(span, TextSpan::new(0, 8));
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line(1), Some("two"));
        assert_eq!(buffer.line(2), Some(""));
    }

    #[test]
    fn position_round_trips_with_multibyte_text() {
        let mut buffer = TextBuffer::new();
        buffer.append("héllo\nwörld");
        let offset = buffer.offset_of(1, 2).expect("position exists");
        assert_eq!(&buffer.as_str()[offset..], "rld");
        assert_eq!(buffer.position_of(offset), Ok((1, 2)));
        assert_eq!(buffer.offset_of(0, 5), Ok(6));
        assert!(buffer.offset_of(0, 6).is_err());
        assert!(buffer.offset_of(4, 0).is_err());
    }

    #[test]
    fn replace_reindexes_lines() {
        let mut buffer = TextBuffer::new();
        buffer.append("a\nb\nc");
        let span = buffer
            .replace(TextSpan::new(2, 3), "x\ny\nz")
            .expect("replace");
        assert_eq!(span, TextSpan::new(2, 7));
        assert_eq!(buffer.as_str(), "a\nx\ny\nz\nc");
        assert_eq!(buffer.line_count(), 5);
        assert_eq!(buffer.line(4), Some("c"));
    }

    #[test]
    fn rejects_stale_and_split_offsets() {
        let mut buffer = TextBuffer::new();
        buffer.append("é");
        assert_eq!(
            buffer.slice(TextSpan::new(0, 1)),
            Err(BufferError::NotCharBoundary { offset: 1 })
        );
        assert!(matches!(
            buffer.delete(TextSpan::new(0, 9)),
            Err(BufferError::OutOfRange { .. })
        ));
    }

    #[test]
    fn char_offsets_convert_both_ways() {
        let mut buffer = TextBuffer::new();
        buffer.append("añb");
        assert_eq!(buffer.char_to_byte(2), Ok(3));
        assert_eq!(buffer.char_to_byte(3), Ok(4));
        assert_eq!(buffer.byte_to_char(3), Ok(2));
        assert_eq!(buffer.slice_chars(1, 2), Ok("ñ"));
        assert!(buffer.char_to_byte(4).is_err());
    }

    #[test]
    fn insert_and_delete_preserve_content() {
        let mut buffer = TextBuffer::new();
        buffer.append("hello world");
        buffer.insert(5, ",").expect("insert");
        assert_eq!(buffer.as_str(), "hello, world");
        let removed = buffer.delete(TextSpan::new(0, 7)).expect("delete");
        assert_eq!(removed, "hello, ");
        assert_eq!(buffer.as_str(), "world");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.line_count(), 1);
    }
}
