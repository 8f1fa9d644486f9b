use std::collections::BTreeSet;
use std::time::Instant;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::ui::markdown::{CopyAffordance, RenderEngine};

/// Turns the engine's buffer into display lines.
///
/// Hidden spans are dropped, every other span is layered onto the text in
/// commit order (later spans patch earlier ones), and each copy button is
/// appended to the display line where its block starts.
pub fn to_lines(engine: &RenderEngine, now: Instant) -> Vec<Line<'static>> {
    let text = engine.buffer().as_str();
    let spans: Vec<_> = engine.resolved_spans().collect();
    let mut affordances = engine.copy_affordances(now);
    affordances.sort_by_key(|a| a.offset);
    let mut affordances = affordances.into_iter().peekable();

    let mut cuts: BTreeSet<usize> = BTreeSet::from([0, text.len()]);
    for (span, _) in &spans {
        cuts.insert(span.span.start);
        cuts.insert(span.span.end);
    }
    for (i, _) in text.match_indices('\n') {
        cuts.insert(i);
        cuts.insert(i + 1);
    }
    let cuts: Vec<usize> = cuts.into_iter().collect();

    // Span indices by start offset; `active` holds the spans covering the
    // current segment, kept in commit order.
    let mut by_start: Vec<usize> = (0..spans.len()).collect();
    by_start.sort_by_key(|&i| spans[i].0.span.start);
    let mut next_span = by_start.into_iter().peekable();
    let mut active: Vec<usize> = Vec::new();

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut pending_buttons: Vec<CopyAffordance> = Vec::new();

    for window in cuts.windows(2) {
        let (start, end) = (window[0], window[1]);
        while affordances.peek().is_some_and(|a| a.offset <= start) {
            pending_buttons.extend(affordances.next());
        }

        active.retain(|&i| spans[i].0.span.end > start);
        while let Some(i) = next_span.next_if(|&i| spans[i].0.span.start <= start) {
            if spans[i].0.span.end > start {
                let at = active.partition_point(|&j| j < i);
                active.insert(at, i);
            }
        }

        let mut hidden = false;
        let mut style = Style::default();
        for (span, resolved) in active.iter().map(|&i| &spans[i]) {
            if span.is_hidden() {
                hidden = true;
                break;
            }
            style = style.patch(*resolved);
        }
        if hidden {
            continue;
        }

        let segment = &text[start..end];
        if segment == "\n" {
            flush_line(&mut lines, &mut current, &mut pending_buttons);
        } else {
            current.push(Span::styled(segment.to_string(), style));
        }
    }
    pending_buttons.extend(affordances);
    if lines.is_empty() || !current.is_empty() || !pending_buttons.is_empty() {
        flush_line(&mut lines, &mut current, &mut pending_buttons);
    }

    lines
}

fn flush_line(
    lines: &mut Vec<Line<'static>>,
    current: &mut Vec<Span<'static>>,
    buttons: &mut Vec<CopyAffordance>,
) {
    for button in buttons.drain(..) {
        current.push(Span::raw(" "));
        current.push(Span::styled(format!("[{}]", button.label), button.style));
    }
    lines.push(Line::from(std::mem::take(current)));
}
