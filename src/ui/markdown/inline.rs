//! Inline markdown on a single line.
//!
//! Matching runs in a fixed order: code spans, bold, italic, links. Each
//! construct claims its whole range, and later passes skip candidates that
//! touch a claimed range, so the emitted spans never overlap. Delimiters are
//! not removed from the text; they are covered by `hidden` spans while the
//! content between them gets the construct's style.

use crate::core::buffer::TextSpan;
use crate::ui::span::{StyleName, StyleSpan};

const MAX_HEADING_LEVEL: usize = 6;

/// Scans one line (without its newline). Spans are relative to `line`,
/// sorted by start offset.
pub fn scan_line(line: &str) -> Vec<StyleSpan> {
    let mut spans = Vec::new();

    if let Some(marker_len) = heading_marker_len(line) {
        let title = line[marker_len..].trim_end();
        spans.push(StyleSpan::new(TextSpan::new(0, marker_len), StyleName::Hidden));
        if !title.is_empty() {
            spans.push(StyleSpan::new(
                TextSpan::new(marker_len, marker_len + title.len()),
                StyleName::Heading,
            ));
        }
        spans.extend(
            scan_inline(&line[marker_len..])
                .into_iter()
                .map(|s| s.offset(marker_len)),
        );
    } else {
        spans.extend(scan_inline(line));
    }

    spans.sort_by_key(|s| (s.span.start, s.span.end));
    spans
}

/// Inline constructs only, with no line-level handling.
pub fn scan_inline(text: &str) -> Vec<StyleSpan> {
    let mut claimed: Vec<TextSpan> = Vec::new();
    let mut spans = Vec::new();

    scan_code_spans(text, &mut claimed, &mut spans);
    scan_paired(text, "**", StyleName::Bold, &mut claimed, &mut spans);
    scan_paired(text, "__", StyleName::Bold, &mut claimed, &mut spans);
    scan_single(text, b'*', &mut claimed, &mut spans);
    scan_single(text, b'_', &mut claimed, &mut spans);
    scan_links(text, &mut claimed, &mut spans);

    spans.sort_by_key(|s| (s.span.start, s.span.end));
    spans
}

/// Length of an ATX heading marker (`## `) at the start of the line.
fn heading_marker_len(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    match line.as_bytes().get(hashes) {
        Some(b' ' | b'\t') => Some(hashes + 1),
        _ => None,
    }
}

fn is_free(claimed: &[TextSpan], span: TextSpan) -> bool {
    !claimed.iter().any(|c| c.overlaps(&span))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b >= 0x80
}

fn push_delimited(
    spans: &mut Vec<StyleSpan>,
    claimed: &mut Vec<TextSpan>,
    open: usize,
    close: usize,
    delim_len: usize,
    style: StyleName,
) {
    spans.push(StyleSpan::new(
        TextSpan::new(open, open + delim_len),
        StyleName::Hidden,
    ));
    spans.push(StyleSpan::new(TextSpan::new(open + delim_len, close), style));
    spans.push(StyleSpan::new(
        TextSpan::new(close, close + delim_len),
        StyleName::Hidden,
    ));
    claimed.push(TextSpan::new(open, close + delim_len));
}

fn scan_code_spans(text: &str, claimed: &mut Vec<TextSpan>, spans: &mut Vec<StyleSpan>) {
    let mut from = 0;
    while let Some(rel) = text[from..].find('`') {
        let open = from + rel;
        let Some(close_rel) = text[open + 1..].find('`') else {
            break;
        };
        let close = open + 1 + close_rel;
        if close == open + 1 {
            // empty pair, not a code span
            from = close + 1;
            continue;
        }
        push_delimited(spans, claimed, open, close, 1, StyleName::InlineCode);
        from = close + 1;
    }
}

/// Two-character emphasis (`**x**`, `__x__`).
fn scan_paired(
    text: &str,
    delim: &str,
    style: StyleName,
    claimed: &mut Vec<TextSpan>,
    spans: &mut Vec<StyleSpan>,
) {
    let bytes = text.as_bytes();
    let word_bounded = delim.starts_with('_');
    let mut from = 0;

    while let Some(rel) = text[from..].find(delim) {
        let open = from + rel;
        let content_start = open + delim.len();
        let Some(close_rel) = text[content_start..].find(delim) else {
            break;
        };
        let close = content_start + close_rel;
        let content = &text[content_start..close];
        let outer = TextSpan::new(open, close + delim.len());

        let well_formed = !content.is_empty()
            && !content.starts_with(char::is_whitespace)
            && !content.ends_with(char::is_whitespace)
            && is_free(claimed, outer);
        let bounded = !word_bounded
            || (open.checked_sub(1).is_none_or(|p| !is_word_byte(bytes[p]))
                && bytes.get(outer.end).is_none_or(|b| !is_word_byte(*b)));

        if well_formed && bounded {
            push_delimited(spans, claimed, open, close, delim.len(), style);
            from = outer.end;
        } else {
            from = open + 1;
        }
    }
}

/// One-character emphasis (`*x*`, `_x_`). A delimiter adjacent to another
/// copy of itself belongs to bold and is never used here.
fn scan_single(text: &str, delim: u8, claimed: &mut Vec<TextSpan>, spans: &mut Vec<StyleSpan>) {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let lone = |i: usize| {
        bytes[i] == delim
            && (i == 0 || bytes[i - 1] != delim)
            && bytes.get(i + 1).is_none_or(|b| *b != delim)
    };
    let word_bounded = delim == b'_';

    let mut i = 0;
    while i < len {
        let opens = lone(i)
            && bytes.get(i + 1).is_some_and(|b| !b.is_ascii_whitespace())
            && !(word_bounded && i > 0 && is_word_byte(bytes[i - 1]))
            && is_free(claimed, TextSpan::new(i, i + 1));
        if !opens {
            i += 1;
            continue;
        }

        let close = (i + 2..len).find(|&j| {
            lone(j)
                && !bytes[j - 1].is_ascii_whitespace()
                && !(word_bounded && bytes.get(j + 1).is_some_and(|b| is_word_byte(*b)))
        });

        match close {
            Some(j) if is_free(claimed, TextSpan::new(i, j + 1)) => {
                push_delimited(spans, claimed, i, j, 1, StyleName::Italic);
                i = j + 1;
            }
            _ => i += 1,
        }
    }
}

/// `[label](target)`; the whole construct is styled as one link.
fn scan_links(text: &str, claimed: &mut Vec<TextSpan>, spans: &mut Vec<StyleSpan>) {
    let mut from = 0;
    while let Some(rel) = text[from..].find('[') {
        let open = from + rel;
        let parsed = text[open..].find("](").and_then(|label_end| {
            let target_start = open + label_end + 2;
            text[target_start..]
                .find(')')
                .map(|target_len| (label_end, target_start + target_len))
        });
        match parsed {
            Some((label_end, close)) if label_end > 1 => {
                let label = &text[open + 1..open + label_end];
                let link = TextSpan::new(open, close + 1);
                if !label.contains('[') && is_free(claimed, link) {
                    spans.push(StyleSpan::new(link, StyleName::Link));
                    claimed.push(link);
                    from = link.end;
                } else {
                    from = open + 1;
                }
            }
            Some(_) => from = open + 1,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled<'a>(line: &'a str, spans: &[StyleSpan], style: StyleName) -> Vec<&'a str> {
        spans
            .iter()
            .filter(|s| s.style == style)
            .map(|s| &line[s.span.as_range()])
            .collect()
    }

    #[test]
    fn bold_hides_delimiters() {
        let line = "Hello **world**";
        let spans = scan_line(line);
        assert_eq!(styled(line, &spans, StyleName::Bold), vec!["world"]);
        assert_eq!(styled(line, &spans, StyleName::Hidden), vec!["**", "**"]);
        assert_eq!(
            spans
                .iter()
                .filter(|s| s.is_hidden())
                .map(|s| s.span)
                .collect::<Vec<_>>(),
            vec![TextSpan::new(6, 8), TextSpan::new(13, 15)]
        );
    }

    #[test]
    fn italic_does_not_eat_bold_delimiters() {
        let line = "**bold** and *soft* and _under_";
        let spans = scan_line(line);
        assert_eq!(styled(line, &spans, StyleName::Bold), vec!["bold"]);
        assert_eq!(styled(line, &spans, StyleName::Italic), vec!["soft", "under"]);
    }

    #[test]
    fn code_spans_shield_their_content() {
        let line = "run `a **b** c` then **d**";
        let spans = scan_line(line);
        assert_eq!(styled(line, &spans, StyleName::InlineCode), vec!["a **b** c"]);
        assert_eq!(styled(line, &spans, StyleName::Bold), vec!["d"]);
    }

    #[test]
    fn snake_case_is_not_italic() {
        let line = "call my_var_name or snake_case_fn() here";
        let spans = scan_line(line);
        assert!(styled(line, &spans, StyleName::Italic).is_empty());
        assert!(spans.is_empty());
    }

    #[test]
    fn links_cover_label_and_target() {
        let line = "see [the docs](https://example.com/a_b_c) now";
        let spans = scan_line(line);
        assert_eq!(
            styled(line, &spans, StyleName::Link),
            vec!["[the docs](https://example.com/a_b_c)"]
        );
        assert!(styled(line, &spans, StyleName::Italic).is_empty());
    }

    #[test]
    fn whitespace_padded_markers_are_literal() {
        let line = "2 * 3 * 4 and ** loose **";
        assert!(scan_line(line).is_empty());
    }

    #[test]
    fn heading_marker_is_hidden() {
        let line = "## Setup *fast*";
        let spans = scan_line(line);
        assert_eq!(styled(line, &spans, StyleName::Heading), vec!["Setup *fast*"]);
        assert_eq!(styled(line, &spans, StyleName::Hidden), vec!["## ", "*", "*"]);
        assert_eq!(styled(line, &spans, StyleName::Italic), vec!["fast"]);
        assert!(scan_line("#hashtag").is_empty());
    }

    #[test]
    fn unmatched_delimiters_yield_nothing() {
        assert!(scan_line("a `dangling tick").is_empty());
        assert!(scan_line("an *open emphasis").is_empty());
        assert!(scan_line("[label] (not a link)").is_empty());
    }

    #[test]
    fn style_spans_never_overlap() {
        let line = "`x` **y** *z* [w](v) __u__ _t_";
        let spans = scan_line(line);
        assert_eq!(spans.len(), 16);
        for pair in spans.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
        }
    }
}
