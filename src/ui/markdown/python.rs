//! Line-scoped Python tokenizer for fenced code blocks.
//!
//! Each line is scanned left to right. String literals and the comment are
//! claimed first so nothing inside them is ever classified as a keyword or
//! identifier; the remaining text yields identifiers, numbers, operators and
//! decorators. Triple-quoted strings spanning several lines are not tracked:
//! every line starts outside any literal.

use crate::core::buffer::TextSpan;
use crate::ui::span::StyleName;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "bin", "bool", "chr", "dict", "dir", "enumerate", "filter", "float",
    "format", "frozenset", "getattr", "hasattr", "hash", "help", "hex", "id", "input", "int",
    "isinstance", "issubclass", "iter", "len", "list", "map", "max", "min", "next", "object",
    "oct", "open", "ord", "pow", "print", "range", "repr", "reversed", "round", "set",
    "setattr", "slice", "sorted", "str", "sum", "super", "tuple", "type", "vars", "zip",
];

const OPERATOR_CHARS: &[u8] = b"+-*/%=<>!&|^~@";

const TWO_CHAR_OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "//", "**", "<<", ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    "^=", "->",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Builtin,
    String,
    Comment,
    Number,
    Operator,
    FunctionCall,
    ClassName,
    Identifier,
    Decorator,
}

impl TokenKind {
    /// Style used to draw the token; plain identifiers are left unstyled.
    pub fn style(self) -> Option<StyleName> {
        match self {
            TokenKind::Keyword => Some(StyleName::Keyword),
            TokenKind::Builtin => Some(StyleName::Builtin),
            TokenKind::String => Some(StyleName::String),
            TokenKind::Comment => Some(StyleName::Comment),
            TokenKind::Number => Some(StyleName::Number),
            TokenKind::Operator => Some(StyleName::Operator),
            TokenKind::FunctionCall => Some(StyleName::Function),
            TokenKind::ClassName => Some(StyleName::Class),
            TokenKind::Decorator => Some(StyleName::Decorator),
            TokenKind::Identifier => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub span: TextSpan,
    pub kind: TokenKind,
}

impl Token {
    fn new(start: usize, end: usize, kind: TokenKind) -> Self {
        Self {
            span: TextSpan::new(start, end),
            kind,
        }
    }
}

/// Byte offset of the `#` that starts a comment, ignoring any inside
/// string literals.
pub fn find_comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == q {
                    quote = None;
                }
            }
            None => {
                if b == b'#' {
                    return Some(i);
                }
                if b == b'"' || b == b'\'' {
                    quote = Some(b);
                }
            }
        }
        i += 1;
    }
    None
}

/// Tokenizes one line. Spans are relative to the start of `line`, ascending
/// and non-overlapping.
pub fn tokenize_line(line: &str, comment_start: Option<usize>) -> Vec<Token> {
    let bytes = line.as_bytes();
    let code_end = comment_start.unwrap_or(bytes.len()).min(bytes.len());
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < code_end {
        let b = bytes[i];

        if b.is_ascii_whitespace() {
            i += 1;
        } else if b == b'"' || b == b'\'' {
            let end = scan_string(bytes, i);
            tokens.push(Token::new(i, end, TokenKind::String));
            i = end;
        } else if b.is_ascii_digit()
            || (b == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        {
            let end = scan_number(bytes, i);
            tokens.push(Token::new(i, end, TokenKind::Number));
            i = end;
        } else if b == b'@' && line[..i].trim().is_empty() {
            let end = i + 1 + bytes[i + 1..]
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric() || **c == b'_' || **c == b'.')
                .count();
            tokens.push(Token::new(i, end, TokenKind::Decorator));
            i = end;
        } else if OPERATOR_CHARS.contains(&b) {
            let end = if line
                .get(i..i + 2)
                .is_some_and(|pair| TWO_CHAR_OPERATORS.contains(&pair))
            {
                i + 2
            } else {
                i + 1
            };
            tokens.push(Token::new(i, end, TokenKind::Operator));
            i = end;
        } else {
            let Some(ch) = line[i..].chars().next() else {
                break;
            };
            if ch.is_alphabetic() || ch == '_' {
                let end = i + line[i..]
                    .char_indices()
                    .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
                    .map(|(j, _)| j)
                    .unwrap_or(line.len() - i);
                let end = end.min(code_end);
                let kind = classify_word(&line[i..end], bytes.get(end).copied());
                tokens.push(Token::new(i, end, kind));
                i = end;
            } else {
                i += ch.len_utf8();
            }
        }
    }

    if let Some(start) = comment_start.filter(|s| *s < bytes.len()) {
        tokens.push(Token::new(start, bytes.len(), TokenKind::Comment));
    }

    tokens
}

/// Tokenizes a multi-line block; spans are relative to the start of `text`.
pub fn tokenize_block(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let comment = find_comment_start(line);
        tokens.extend(tokenize_line(line, comment).into_iter().map(|t| Token {
            span: t.span.offset(offset),
            kind: t.kind,
        }));
        offset += raw_line.len() + 1;
    }
    tokens
}

fn classify_word(word: &str, next: Option<u8>) -> TokenKind {
    if KEYWORDS.contains(&word) {
        TokenKind::Keyword
    } else if BUILTINS.contains(&word) {
        TokenKind::Builtin
    } else if next == Some(b'(') {
        TokenKind::FunctionCall
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        TokenKind::ClassName
    } else {
        TokenKind::Identifier
    }
}

/// End of the string literal opening at `start`: just past the matching
/// unescaped quote, or the end of the line.
fn scan_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    let at = |i: usize| bytes.get(i).copied();

    if at(i) == Some(b'0') && matches!(at(i + 1), Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')) {
        i += 2;
        while at(i).is_some_and(|c| c.is_ascii_hexdigit() || c == b'_') {
            i += 1;
        }
        return i;
    }

    while at(i).is_some_and(|c| c.is_ascii_digit() || c == b'_') {
        i += 1;
    }
    if at(i) == Some(b'.') {
        i += 1;
        while at(i).is_some_and(|c| c.is_ascii_digit() || c == b'_') {
            i += 1;
        }
    }
    if matches!(at(i), Some(b'e' | b'E')) {
        let digits_at = if matches!(at(i + 1), Some(b'+' | b'-')) {
            i + 2
        } else {
            i + 1
        };
        if at(digits_at).is_some_and(|c| c.is_ascii_digit()) {
            i = digits_at;
            while at(i).is_some_and(|c| c.is_ascii_digit() || c == b'_') {
                i += 1;
            }
        }
    }
    if matches!(at(i), Some(b'j' | b'J')) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(&str, TokenKind)> {
        tokenize_line(line, find_comment_start(line))
            .into_iter()
            .map(|t| (&line[t.span.as_range()], t.kind))
            .collect()
    }

    #[test]
    fn classifies_words() {
        assert_eq!(
            kinds("def area(r): return len(Shape.unit) * r"),
            vec![
                ("def", TokenKind::Keyword),
                ("area", TokenKind::FunctionCall),
                ("r", TokenKind::Identifier),
                ("return", TokenKind::Keyword),
                ("len", TokenKind::Builtin),
                ("Shape", TokenKind::ClassName),
                ("unit", TokenKind::Identifier),
                ("*", TokenKind::Operator),
                ("r", TokenKind::Identifier),
            ]
        );
    }

    #[test]
    fn strings_preempt_keywords_and_comments() {
        let line = r#"x = "if # not a comment" + 'it\'s'  # real"#;
        let tokens = kinds(line);
        assert_eq!(tokens[2], (r#""if # not a comment""#, TokenKind::String));
        assert_eq!(tokens[4], (r"'it\'s'", TokenKind::String));
        assert_eq!(tokens.last(), Some(&("# real", TokenKind::Comment)));
        assert!(!tokens.iter().any(|(_, k)| *k == TokenKind::Keyword));
    }

    #[test]
    fn unterminated_string_runs_to_end_of_line() {
        let tokens = kinds("s = 'open");
        assert_eq!(tokens.last(), Some(&("'open", TokenKind::String)));
    }

    #[test]
    fn comment_stops_tokenizing() {
        let tokens = kinds("# def class return");
        assert_eq!(tokens, vec![("# def class return", TokenKind::Comment)]);
    }

    #[test]
    fn numbers_in_many_forms() {
        let tokens = kinds("a = 0xFF + 1_000 + 3.14e-2 + .5 + 2j");
        let numbers: Vec<&str> = tokens
            .iter()
            .filter(|(_, k)| *k == TokenKind::Number)
            .map(|(s, _)| *s)
            .collect();
        assert_eq!(numbers, vec!["0xFF", "1_000", "3.14e-2", ".5", "2j"]);
        assert!(tokens.contains(&("+", TokenKind::Operator)));
    }

    #[test]
    fn identifiers_with_digits_are_not_numbers() {
        assert_eq!(kinds("x1"), vec![("x1", TokenKind::Identifier)]);
    }

    #[test]
    fn coalesces_two_char_operators() {
        let tokens = kinds("a **= b == c");
        assert!(tokens.contains(&("**", TokenKind::Operator)));
        assert!(tokens.contains(&("=", TokenKind::Operator)));
        assert!(tokens.contains(&("==", TokenKind::Operator)));
    }

    #[test]
    fn decorators_only_at_line_start() {
        assert_eq!(
            kinds("    @functools.cache"),
            vec![("@functools.cache", TokenKind::Decorator)]
        );
        assert!(kinds("a @ b").contains(&("@", TokenKind::Operator)));
    }

    #[test]
    fn tokens_are_ordered_and_disjoint() {
        let line = "for i, (k, v) in enumerate(d.items()):  # loop 'x'";
        let tokens = tokenize_line(line, find_comment_start(line));
        for pair in tokens.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
        }
    }

    #[test]
    fn block_offsets_span_lines() {
        let text = "def f():\n    return 1  # ok";
        let tokens = tokenize_block(text);
        let tagged: Vec<(&str, TokenKind)> = tokens
            .iter()
            .map(|t| (&text[t.span.as_range()], t.kind))
            .collect();
        assert!(tagged.contains(&("def", TokenKind::Keyword)));
        assert!(tagged.contains(&("f", TokenKind::FunctionCall)));
        assert!(tagged.contains(&("return", TokenKind::Keyword)));
        assert!(tagged.contains(&("1", TokenKind::Number)));
        assert_eq!(tagged.last(), Some(&("# ok", TokenKind::Comment)));
    }

    #[test]
    fn non_ascii_text_is_skipped_safely() {
        let tokens = kinds("print('héllo') → ünïcode");
        assert_eq!(tokens[0], ("print", TokenKind::Builtin));
        assert_eq!(tokens[1], ("'héllo'", TokenKind::String));
        assert_eq!(tokens[2], ("ünïcode", TokenKind::Identifier));
    }
}
