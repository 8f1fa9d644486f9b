//! The per-message render pipeline.
//!
//! A render pass appends the message text to the buffer before anything
//! else, so the words are always there even when styling fails. Every style
//! span is then computed against that unmodified snapshot. Table rewrites
//! run last; the spans computed earlier are shifted through the rewrite
//! edits before they are committed, so no offset is ever read back from a
//! buffer that has already changed under it.

use std::time::Instant;

use chrono::{DateTime, Local};
use ratatui::style::Style;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::buffer::{TextBuffer, TextSpan};
use crate::core::config::defaults::DEFAULT_TABLE_ROW_LIMIT;
use crate::core::message::SenderKind;
use crate::ui::span::{StyleName, StyleSpan};
use crate::ui::theme::StyleRegistry;
use crate::utils::clipboard::Clipboard;

use super::copy::{CopyHandle, CopyOutcome, CopyRegistry};
use super::fence::{scan_fences, FenceLanguage, FencedBlock};
use super::inline::{scan_inline, scan_line};
use super::python::tokenize_block;
use super::table::{scan_tables, TableRegion};

/// Blank line placed between consecutive messages.
const MESSAGE_SEPARATOR: &str = "\n\n";

/// Settings that shape one render call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderContext {
    pub is_dark: bool,
    pub markdown_enabled: bool,
    pub sender_labels: bool,
    pub timestamps: bool,
    pub table_row_limit: usize,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            is_dark: false,
            markdown_enabled: true,
            sender_labels: true,
            timestamps: false,
            table_row_limit: DEFAULT_TABLE_ROW_LIMIT,
        }
    }
}

impl RenderContext {
    pub fn with_dark(mut self, is_dark: bool) -> Self {
        self.is_dark = is_dark;
        self
    }

    pub fn with_markdown(mut self, enabled: bool) -> Self {
        self.markdown_enabled = enabled;
        self
    }

    pub fn with_sender_labels(mut self, enabled: bool) -> Self {
        self.sender_labels = enabled;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn with_table_row_limit(mut self, limit: usize) -> Self {
        self.table_row_limit = limit.max(1);
        self
    }
}

/// Where a rendered message landed in the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageRegion {
    /// Timestamp, label and body.
    pub outer: TextSpan,
    /// The message text itself, after table rewrites.
    pub body: TextSpan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPhase {
    ScanFences,
    ScanTables,
    BlockStyles,
    InlineStyles,
    TableRewrites,
    CopyHandles,
    Done,
}

/// A copy button the presentation layer should draw.
#[derive(Clone, Debug, PartialEq)]
pub struct CopyAffordance {
    pub id: Uuid,
    /// Buffer offset of the block's opening delimiter.
    pub offset: usize,
    pub label: &'static str,
    pub style: Style,
}

/// One replaced table: `start` and `old_len` in snapshot coordinates.
#[derive(Clone, Copy, Debug)]
struct Edit {
    start: usize,
    old_len: usize,
    new_len: usize,
}

/// Shifts a snapshot offset past every edit that ends at or before it.
fn map_offset(offset: usize, edits: &[Edit]) -> usize {
    edits
        .iter()
        .filter(|e| e.start + e.old_len <= offset)
        .fold(offset as isize, |acc, e| {
            acc + e.new_len as isize - e.old_len as isize
        })
        .max(0) as usize
}

fn map_span(span: TextSpan, edits: &[Edit]) -> TextSpan {
    TextSpan::new(map_offset(span.start, edits), map_offset(span.end, edits))
}

/// Line bounds of `text` as `(start, end)` with `end` at the newline.
fn line_spans(text: &str) -> impl Iterator<Item = TextSpan> + '_ {
    let mut start = 0;
    text.split('\n').map(move |line| {
        let span = TextSpan::new(start, start + line.len());
        start += line.len() + 1;
        span
    })
}

/// Parts of `line` not covered by any `excluded` span (sorted by start).
fn free_segments(line: TextSpan, excluded: &[TextSpan]) -> Vec<TextSpan> {
    let mut segments = Vec::new();
    let mut cursor = line.start;
    for ex in excluded.iter().filter(|ex| ex.overlaps(&line)) {
        if ex.start > cursor {
            segments.push(TextSpan::new(cursor, ex.start));
        }
        cursor = cursor.max(ex.end);
    }
    if cursor < line.end {
        segments.push(TextSpan::new(cursor, line.end));
    }
    segments
}

/// Inline markdown over `text[region]`, line by line.
fn scan_markdown_lines(text: &str, region: TextSpan, out: &mut Vec<StyleSpan>) {
    let Some(slice) = text.get(region.as_range()) else {
        return;
    };
    for line in line_spans(slice) {
        let content = &slice[line.as_range()];
        let content = content.strip_suffix('\r').unwrap_or(content);
        out.extend(
            scan_line(content)
                .into_iter()
                .map(|s| s.offset(region.start + line.start)),
        );
    }
}

/// Owns the transcript buffer, its style spans and the live copy handles.
#[derive(Debug, Default)]
pub struct RenderEngine {
    buffer: TextBuffer,
    spans: Vec<StyleSpan>,
    /// `spans[i]` resolved against the active theme.
    resolved: Vec<Style>,
    registry: StyleRegistry,
    copies: CopyRegistry,
}

impl RenderEngine {
    pub fn new(registry: StyleRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn copy_handles(&self) -> &[CopyHandle] {
        self.copies.handles()
    }

    /// Spans paired with their resolved attributes, in commit order.
    pub fn resolved_spans(&self) -> impl Iterator<Item = (&StyleSpan, Style)> + '_ {
        self.spans.iter().zip(self.resolved.iter().copied())
    }

    /// Renders one message stamped with the current local time.
    pub fn render(&mut self, text: &str, sender: SenderKind, ctx: &RenderContext) -> MessageRegion {
        self.render_at(text, sender, ctx, Local::now())
    }

    pub fn render_at(
        &mut self,
        text: &str,
        sender: SenderKind,
        ctx: &RenderContext,
        at: DateTime<Local>,
    ) -> MessageRegion {
        self.apply_theme(ctx.is_dark);

        if !self.buffer.is_empty() {
            self.buffer.append(MESSAGE_SEPARATOR);
        }
        let outer_start = self.buffer.len();
        let sender_style = StyleName::for_sender(sender);

        if ctx.timestamps {
            let stamp = at.format("[%H:%M:%S] ").to_string();
            let span = self.buffer.append(&stamp);
            self.commit(StyleSpan::new(span, StyleName::Timestamp));
        }
        if ctx.sender_labels {
            let span = self.buffer.append(sender.label());
            self.commit(StyleSpan::new(span, sender_style));
        }

        // Plain text goes in before any styling is attempted.
        let body = self.buffer.append(text);
        let base = body.start;

        if !(ctx.markdown_enabled && sender.renders_markdown()) {
            self.commit(StyleSpan::new(body, sender_style));
            debug!(sender = sender.as_str(), bytes = text.len(), "Rendered plain message");
            return MessageRegion {
                outer: TextSpan::new(outer_start, body.end),
                body,
            };
        }

        let mut pending = vec![StyleSpan::new(TextSpan::new(0, text.len()), sender_style)];

        let blocks = scan_fences(text);
        debug!(phase = ?RenderPhase::ScanFences, blocks = blocks.len());

        let fenced: Vec<TextSpan> = blocks.iter().map(|b| b.outer).collect();
        let tables = scan_tables(text, &fenced, ctx.table_row_limit);
        debug!(phase = ?RenderPhase::ScanTables, tables = tables.len());

        for block in &blocks {
            block_styles(text, block, &mut pending);
        }
        debug!(phase = ?RenderPhase::BlockStyles, spans = pending.len());

        let mut excluded: Vec<TextSpan> = fenced
            .iter()
            .copied()
            .chain(tables.iter().map(|t| t.span))
            .collect();
        excluded.sort();
        let before_inline = pending.len();
        for line in line_spans(text) {
            for segment in free_segments(line, &excluded) {
                let content = &text[segment.as_range()];
                let content = content.strip_suffix('\r').unwrap_or(content);
                let found = if segment.start == line.start {
                    scan_line(content)
                } else {
                    scan_inline(content)
                };
                pending.extend(found.into_iter().map(|s| s.offset(segment.start)));
            }
        }
        debug!(
            phase = ?RenderPhase::InlineStyles,
            spans = pending.len() - before_inline
        );

        let (edits, table_spans) = self.rewrite_tables(base, &tables);
        debug!(phase = ?RenderPhase::TableRewrites, rewritten = edits.len());

        for span in pending {
            let mapped = StyleSpan::new(map_span(span.span, &edits), span.style).offset(base);
            self.commit(mapped);
        }
        for span in table_spans {
            self.commit(span);
        }

        for block in &blocks {
            let start = base + map_offset(block.outer.start, &edits);
            self.copies.register(CopyHandle::new(
                start,
                block.payload(text),
                block.language_tag.clone(),
            ));
        }
        debug!(phase = ?RenderPhase::CopyHandles, handles = blocks.len());

        let body = TextSpan::new(base, base + map_offset(text.len(), &edits));
        debug!(phase = ?RenderPhase::Done, sender = sender.as_str(), body_len = body.len());
        MessageRegion {
            outer: TextSpan::new(outer_start, body.end),
            body,
        }
    }

    /// Replaces each table's source lines with its grid, last table first so
    /// earlier buffer offsets stay valid. Returns the applied edits in
    /// snapshot order and the table styles in final buffer coordinates.
    fn rewrite_tables(&mut self, base: usize, tables: &[TableRegion]) -> (Vec<Edit>, Vec<StyleSpan>) {
        let mut edits = Vec::new();
        for region in tables.iter().rev() {
            let grid = region.table.render_grid().join("\n");
            match self.buffer.replace(region.span.offset(base), &grid) {
                Ok(_) => edits.push(Edit {
                    start: region.span.start,
                    old_len: region.span.len(),
                    new_len: grid.len(),
                }),
                Err(err) => warn!(error = %err, "Skipping table rewrite"),
            }
            if region.skipped_rows > 0 {
                warn!(rows = region.skipped_rows, "Dropped malformed table rows");
            }
        }
        edits.reverse();

        let mut spans = Vec::new();
        for edit in &edits {
            let start = base + map_offset(edit.start, &edits);
            let grid = TextSpan::new(start, start + edit.new_len);
            spans.push(StyleSpan::new(grid, StyleName::Table));
            // header row is the second grid line
            let Ok(text) = self.buffer.slice(grid) else {
                continue;
            };
            if let Some(first_nl) = text.find('\n') {
                let rest = &text[first_nl + 1..];
                let len = rest.find('\n').unwrap_or(rest.len());
                let header_start = grid.start + first_nl + 1;
                spans.push(StyleSpan::new(
                    TextSpan::new(header_start, header_start + len),
                    StyleName::TableHeader,
                ));
            }
        }
        (edits, spans)
    }

    fn commit(&mut self, span: StyleSpan) {
        if let Err(err) = self.buffer.slice(span.span) {
            warn!(error = %err, style = span.style.as_str(), "Dropping style span");
            return;
        }
        if span.span.is_empty() {
            return;
        }
        self.resolved.push(self.registry.resolve(span.style));
        self.spans.push(span);
    }

    /// Switches between the light and dark theme. Only resolved attributes
    /// change; nothing is rescanned. Returns whether anything changed.
    pub fn apply_theme(&mut self, is_dark: bool) -> bool {
        if !self.registry.set_dark(is_dark) {
            return false;
        }
        self.re_resolve();
        debug!(is_dark, spans = self.spans.len(), "Re-resolved styles");
        true
    }

    /// Installs a different theme pair and re-resolves every span.
    pub fn set_registry(&mut self, registry: StyleRegistry) {
        self.registry = registry;
        self.re_resolve();
    }

    fn re_resolve(&mut self) {
        let registry = &self.registry;
        self.resolved = self.spans.iter().map(|s| registry.resolve(s.style)).collect();
    }

    /// Empties the buffer and drops every span and copy handle.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.spans.clear();
        self.resolved.clear();
        self.copies.clear();
    }

    pub fn activate_copy(
        &mut self,
        id: Uuid,
        clipboard: &dyn Clipboard,
        now: Instant,
    ) -> Option<CopyOutcome> {
        self.copies.activate(id, clipboard, now)
    }

    pub fn copy_affordances(&self, now: Instant) -> Vec<CopyAffordance> {
        self.copies
            .handles()
            .iter()
            .map(|handle| {
                let style = match handle.acknowledgement(now) {
                    Some(_) => StyleName::CopyButtonAck,
                    None => StyleName::CopyButton,
                };
                CopyAffordance {
                    id: handle.id,
                    offset: handle.block_outer_start,
                    label: handle.label(now),
                    style: self.registry.resolve(style),
                }
            })
            .collect()
    }

    /// Buffer text with every hidden span removed.
    pub fn visible_text(&self) -> String {
        let mut hidden: Vec<TextSpan> = self
            .spans
            .iter()
            .filter(|s| s.is_hidden())
            .map(|s| s.span)
            .collect();
        hidden.sort();

        let text = self.buffer.as_str();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in hidden {
            if span.start > cursor {
                out.push_str(&text[cursor..span.start]);
            }
            cursor = cursor.max(span.end);
        }
        out.push_str(&text[cursor.min(text.len())..]);
        out
    }
}

/// Background, hidden fence lines and language styling for one block.
fn block_styles(text: &str, block: &FencedBlock, out: &mut Vec<StyleSpan>) {
    out.push(StyleSpan::new(block.outer, StyleName::CodeBlock));
    out.push(StyleSpan::new(block.opening, StyleName::Hidden));
    out.push(StyleSpan::new(
        TextSpan::new(block.inner.end, block.outer.end),
        StyleName::Hidden,
    ));

    match block.language() {
        FenceLanguage::Python => {
            let Some(inner) = text.get(block.inner.as_range()) else {
                return;
            };
            out.extend(tokenize_block(inner).into_iter().filter_map(|token| {
                token
                    .kind
                    .style()
                    .map(|style| StyleSpan::new(token.span.offset(block.inner.start), style))
            }));
        }
        FenceLanguage::Markdown => scan_markdown_lines(text, block.inner, out),
        FenceLanguage::Generic => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_shift_only_past_finished_edits() {
        let edits = [
            Edit {
                start: 10,
                old_len: 5,
                new_len: 20,
            },
            Edit {
                start: 30,
                old_len: 10,
                new_len: 4,
            },
        ];
        assert_eq!(map_offset(3, &edits), 3);
        assert_eq!(map_offset(15, &edits), 30);
        assert_eq!(map_offset(29, &edits), 44);
        assert_eq!(map_offset(45, &edits), 54);
    }

    #[test]
    fn free_segments_skip_excluded_ranges() {
        let line = TextSpan::new(0, 20);
        let excluded = [TextSpan::new(5, 10), TextSpan::new(12, 14)];
        assert_eq!(
            free_segments(line, &excluded),
            vec![
                TextSpan::new(0, 5),
                TextSpan::new(10, 12),
                TextSpan::new(14, 20)
            ]
        );
        assert!(free_segments(line, &[TextSpan::new(0, 25)]).is_empty());
    }

    #[test]
    fn context_builders_clamp_row_limit() {
        let ctx = RenderContext::default()
            .with_dark(true)
            .with_table_row_limit(0);
        assert!(ctx.is_dark);
        assert_eq!(ctx.table_row_limit, 1);
    }
}
