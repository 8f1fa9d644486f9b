use unicode_width::UnicodeWidthStr;

use super::helpers::{bare_context, render_assistant, styled_texts};
use crate::core::message::SenderKind;
use crate::ui::markdown::RenderEngine;
use crate::ui::span::StyleName;

#[test]
fn header_only_table_renders_four_lines() {
    let (engine, region) = render_assistant("| a | b |\n|---|---|");

    let grid: Vec<&str> = engine.buffer().as_str().lines().collect();
    assert_eq!(
        grid,
        vec![
            "┌─────┬─────┐",
            "│  a  │  b  │",
            "├─────┼─────┤",
            "└─────┴─────┘",
        ]
    );
    assert_eq!(region.body.end, engine.buffer().len());
    assert_eq!(
        styled_texts(&engine, StyleName::TableHeader),
        vec!["│  a  │  b  │"]
    );
}

#[test]
fn grid_has_n_plus_four_equal_width_lines() {
    let text = "| Language | Typing |\n|:--|--:|\n| Rust | static |\n| Python | dynamic |\n| 日本語 | n/a |";
    let (engine, _) = render_assistant(text);

    let lines: Vec<&str> = engine.buffer().as_str().lines().collect();
    assert_eq!(lines.len(), 3 + 4);
    let width = UnicodeWidthStr::width(lines[0]);
    assert!(lines
        .iter()
        .all(|line| UnicodeWidthStr::width(*line) == width));
    assert_eq!(lines[3], "│ Rust     │ static  │");
}

#[test]
fn spans_around_a_table_follow_the_rewrite() {
    let text = "Intro **bold**\n| h | v |\n|---|---|\n| x | 1 |\nafter *it*";
    let (engine, region) = render_assistant(text);

    assert_eq!(
        engine.buffer().as_str(),
        "Intro **bold**\n\
         ┌─────┬─────┐\n\
         │  h  │  v  │\n\
         ├─────┼─────┤\n\
         │ x   │ 1   │\n\
         └─────┴─────┘\n\
         after *it*"
    );
    assert_eq!(region.body.end, engine.buffer().len());
    assert_eq!(styled_texts(&engine, StyleName::Bold), vec!["bold"]);
    assert_eq!(styled_texts(&engine, StyleName::Italic), vec!["it"]);
    assert_eq!(engine.visible_text().lines().last(), Some("after it"));
}

#[test]
fn two_tables_are_both_rewritten() {
    let text = "| a |\n|---|\n| 1 |\n\nmid **m**\n\n| b |\n|---|\n| 2 |";
    let (engine, _) = render_assistant(text);

    let buffer = engine.buffer().as_str();
    assert!(!buffer.contains("|---|"));
    assert_eq!(styled_texts(&engine, StyleName::Table).len(), 2);
    assert_eq!(styled_texts(&engine, StyleName::Bold), vec!["m"]);
    for grid in styled_texts(&engine, StyleName::Table) {
        assert!(grid.starts_with('┌') && grid.ends_with('┘'), "{grid}");
    }
}

#[test]
fn table_inside_fence_is_left_alone() {
    let text = "```\n| a | b |\n|---|---|\n```";
    let (engine, _) = render_assistant(text);
    assert_eq!(engine.buffer().as_str(), text);
    assert!(styled_texts(&engine, StyleName::Table).is_empty());
}

#[test]
fn row_limit_leaves_overflow_as_text() {
    let mut engine = RenderEngine::default();
    let ctx = bare_context().with_table_row_limit(1);
    engine.render("| h |\n|---|\n| 1 |\n| 2 |", SenderKind::Assistant, &ctx);

    let buffer = engine.buffer().as_str();
    assert!(buffer.ends_with("└─────┘\n| 2 |"), "{buffer}");
}

#[test]
fn malformed_row_does_not_abort_render() {
    let text = "| h |\n|---|\n| 1 | 2 |\n| 3 |\n**after**";
    let (engine, _) = render_assistant(text);

    let lines: Vec<&str> = engine.buffer().as_str().lines().collect();
    assert_eq!(lines[3], "│ 3   │");
    assert_eq!(lines.len(), 6);
    assert_eq!(styled_texts(&engine, StyleName::Bold), vec!["after"]);
}
