use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::core::buffer::TextSpan;

/// Narrowest content width a column is drawn with.
const MIN_COL_WIDTH: usize = 3;
/// Spaces on each side of a cell's content.
const CELL_PADDING: usize = 1;

/// A parsed pipe table, ready to be drawn as a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub header_cells: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Content width of each column in terminal cells, padding excluded.
    pub column_widths: Vec<usize>,
}

/// Where a table sits in the scanned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRegion {
    /// From the start of the header line to the end of the last row,
    /// excluding the final newline.
    pub span: TextSpan,
    pub table: Table,
    /// Rows dropped because they had more cells than the header.
    pub skipped_rows: usize,
}

impl Table {
    /// Builds a table, padding short rows with empty cells.
    pub fn new(header_cells: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = header_cells.len();
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(columns, String::new());
                row
            })
            .collect();

        let column_widths = (0..columns)
            .map(|i| {
                let header = UnicodeWidthStr::width(header_cells[i].as_str());
                rows.iter()
                    .map(|row| UnicodeWidthStr::width(row[i].as_str()))
                    .fold(header, usize::max)
                    .max(MIN_COL_WIDTH)
            })
            .collect();

        Self {
            header_cells,
            rows,
            column_widths,
        }
    }

    pub fn column_count(&self) -> usize {
        self.header_cells.len()
    }

    /// Draws the grid: top border, centred header, separator, one line per
    /// data row, bottom border. Every line has the same display width.
    pub fn render_grid(&self) -> Vec<String> {
        let widths = &self.column_widths;
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(create_border_line("┌", "┐", "┬", widths));
        lines.push(create_content_line(&self.header_cells, widths, center_cell));
        lines.push(create_border_line("├", "┤", "┼", widths));
        for row in &self.rows {
            lines.push(create_content_line(row, widths, left_cell));
        }
        lines.push(create_border_line("└", "┘", "┴", widths));

        lines
    }
}

fn create_border_line(left: &str, right: &str, mid: &str, col_widths: &[usize]) -> String {
    let mut line = String::new();
    line.push_str(left);
    for (i, &width) in col_widths.iter().enumerate() {
        line.push_str(&"─".repeat(width + 2 * CELL_PADDING));
        if i < col_widths.len() - 1 {
            line.push_str(mid);
        }
    }
    line.push_str(right);
    line
}

fn create_content_line(
    cells: &[String],
    col_widths: &[usize],
    layout: fn(&str, usize) -> String,
) -> String {
    let mut line = String::from("│");
    for (cell, &width) in cells.iter().zip(col_widths) {
        line.push_str(&layout(cell, width));
        line.push('│');
    }
    line
}

fn center_cell(text: &str, width: usize) -> String {
    let free = width.saturating_sub(UnicodeWidthStr::width(text));
    let left = free / 2;
    format!(
        "{}{}{}",
        " ".repeat(CELL_PADDING + left),
        text,
        " ".repeat(CELL_PADDING + free - left)
    )
}

fn left_cell(text: &str, width: usize) -> String {
    let free = width.saturating_sub(UnicodeWidthStr::width(text));
    format!(
        "{}{}{}",
        " ".repeat(CELL_PADDING),
        text,
        " ".repeat(CELL_PADDING + free)
    )
}

/// Splits `| a | b |` into trimmed cells. `\|` is kept as a literal pipe.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = match trimmed.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => trimmed,
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = trimmed.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

fn is_row(line: &str) -> bool {
    !line.trim().is_empty() && line.contains('|')
}

/// `|---|:---:|` with one cell per header column.
fn is_separator(line: &str, columns: usize) -> bool {
    if !line.contains('-') {
        return false;
    }
    let cells = split_cells(line);
    cells.len() == columns
        && cells.iter().all(|cell| {
            let inner = cell.strip_prefix(':').unwrap_or(cell);
            let inner = inner.strip_suffix(':').unwrap_or(inner);
            !inner.is_empty() && inner.chars().all(|c| c == '-')
        })
}

/// Line bounds of `text`: `(start, end)` with `end` at the newline.
fn line_bounds(text: &str) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut start = 0;
    for line in text.split('\n') {
        bounds.push((start, start + line.len()));
        start += line.len() + 1;
    }
    bounds
}

/// Finds pipe tables in `text`, ignoring every line that touches an
/// `excluded` span. At most `row_limit` data rows are taken per table; any
/// further rows stay in the text untouched.
pub fn scan_tables(text: &str, excluded: &[TextSpan], row_limit: usize) -> Vec<TableRegion> {
    let lines = line_bounds(text);
    let usable = |idx: usize| -> Option<&str> {
        let (start, end) = *lines.get(idx)?;
        let span = TextSpan::new(start, end);
        if excluded
            .iter()
            .any(|ex| ex.overlaps(&span) || (span.is_empty() && ex.contains(start)))
        {
            return None;
        }
        let line = &text[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    };

    let mut regions = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let Some(header_line) = usable(idx).filter(|l| is_row(l)) else {
            idx += 1;
            continue;
        };
        let header = split_cells(header_line);
        let has_separator = usable(idx + 1).is_some_and(|l| is_separator(l, header.len()));
        if !has_separator {
            idx += 1;
            continue;
        }

        let mut rows = Vec::new();
        let mut skipped_rows = 0;
        let mut last = idx + 1;
        while rows.len() + skipped_rows < row_limit {
            let Some(row_line) = usable(last + 1).filter(|l| is_row(l)) else {
                break;
            };
            let cells = split_cells(row_line);
            if cells.len() > header.len() {
                debug!(
                    line = last + 1,
                    cells = cells.len(),
                    columns = header.len(),
                    "Skipping malformed table row"
                );
                skipped_rows += 1;
            } else {
                rows.push(cells);
            }
            last += 1;
        }

        regions.push(TableRegion {
            span: TextSpan::new(lines[idx].0, lines[last].1),
            table: Table::new(header, rows),
            skipped_rows,
        });
        idx = last + 1;
    }

    regions
}
