//! Named style layers over the transcript buffer.
//!
//! The renderer never stores concrete colours next to text. It records
//! [`StyleSpan`]s, each pairing a byte range with a [`StyleName`], and the
//! active theme resolves names to attributes when the display is drawn.
//! Swapping themes therefore only re-resolves names; the spans stay put.
//!
//! # Examples
//!
//! ```
//! use glint::core::buffer::TextSpan;
//! use glint::ui::span::{StyleName, StyleSpan};
//!
//! let bold = StyleSpan::new(TextSpan::new(6, 11), StyleName::Bold);
//! assert_eq!(bold.style.as_str(), "bold");
//! assert!(!bold.is_hidden());
//! ```

use crate::core::buffer::TextSpan;
use crate::core::message::SenderKind;
use serde::{Deserialize, Serialize};

/// Every style the renderer can lay down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleName {
    Timestamp,
    User,
    Assistant,
    System,
    Error,
    CodeBlock,
    Keyword,
    Builtin,
    String,
    Comment,
    Number,
    Operator,
    Function,
    Class,
    Decorator,
    InlineCode,
    Bold,
    Italic,
    Link,
    Heading,
    /// Zero-width: the text stays in the buffer but is never drawn.
    Hidden,
    Table,
    TableHeader,
    CopyButton,
    CopyButtonAck,
}

impl StyleName {
    pub const ALL: [StyleName; 25] = [
        StyleName::Timestamp,
        StyleName::User,
        StyleName::Assistant,
        StyleName::System,
        StyleName::Error,
        StyleName::CodeBlock,
        StyleName::Keyword,
        StyleName::Builtin,
        StyleName::String,
        StyleName::Comment,
        StyleName::Number,
        StyleName::Operator,
        StyleName::Function,
        StyleName::Class,
        StyleName::Decorator,
        StyleName::InlineCode,
        StyleName::Bold,
        StyleName::Italic,
        StyleName::Link,
        StyleName::Heading,
        StyleName::Hidden,
        StyleName::Table,
        StyleName::TableHeader,
        StyleName::CopyButton,
        StyleName::CopyButtonAck,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Timestamp => "timestamp",
            StyleName::User => "user",
            StyleName::Assistant => "assistant",
            StyleName::System => "system",
            StyleName::Error => "error",
            StyleName::CodeBlock => "code_block",
            StyleName::Keyword => "keyword",
            StyleName::Builtin => "builtin",
            StyleName::String => "string",
            StyleName::Comment => "comment",
            StyleName::Number => "number",
            StyleName::Operator => "operator",
            StyleName::Function => "function",
            StyleName::Class => "class",
            StyleName::Decorator => "decorator",
            StyleName::InlineCode => "inline_code",
            StyleName::Bold => "bold",
            StyleName::Italic => "italic",
            StyleName::Link => "link",
            StyleName::Heading => "heading",
            StyleName::Hidden => "hidden",
            StyleName::Table => "table",
            StyleName::TableHeader => "table_header",
            StyleName::CopyButton => "copy_button",
            StyleName::CopyButtonAck => "copy_button_ack",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == wanted)
    }

    #[inline]
    pub fn for_sender(sender: SenderKind) -> Self {
        match sender {
            SenderKind::User => StyleName::User,
            SenderKind::Assistant => StyleName::Assistant,
            SenderKind::System => StyleName::System,
            SenderKind::Error => StyleName::Error,
        }
    }
}

/// A named style laid over a byte range of the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleSpan {
    pub span: TextSpan,
    pub style: StyleName,
}

impl StyleSpan {
    #[inline]
    pub fn new(span: TextSpan, style: StyleName) -> Self {
        Self { span, style }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.style == StyleName::Hidden
    }

    #[inline]
    pub fn offset(self, by: usize) -> Self {
        Self {
            span: self.span.offset(by),
            style: self.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for style in StyleName::ALL {
            assert_eq!(StyleName::from_name(style.as_str()), Some(style));
        }
        assert_eq!(StyleName::from_name("Code-Block"), Some(StyleName::CodeBlock));
        assert_eq!(StyleName::from_name("sparkles"), None);
    }

    #[test]
    fn sender_styles_are_distinct() {
        assert_eq!(StyleName::for_sender(SenderKind::User), StyleName::User);
        assert_eq!(StyleName::for_sender(SenderKind::Error), StyleName::Error);
    }

    #[test]
    fn offset_moves_span_only() {
        let span = StyleSpan::new(TextSpan::new(1, 4), StyleName::Hidden).offset(10);
        assert_eq!(span.span, TextSpan::new(11, 14));
        assert!(span.is_hidden());
    }
}
