use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_TABLE_COLUMN_WIDTH: usize = 6;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

/// Renders an aligned table when the width budget allows it, otherwise
/// falls back to one labeled block per row.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let budget = max_width
        .saturating_sub(INDENT)
        .saturating_sub(COLUMN_GAP * columns.len().saturating_sub(1));
    let Some(widths) = fit_widths(columns, rows, budget) else {
        return render_blocks(columns, rows, block_label);
    };

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();

    let mut output = vec![format_row(columns, &header, &widths)];
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn fit_widths(columns: &[Column<'_>], rows: &[Vec<String>], budget: usize) -> Option<Vec<usize>> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let minimum_total = MIN_TABLE_COLUMN_WIDTH * columns.len();
    if budget < minimum_total {
        return None;
    }

    // Shave the widest column first until the budget holds.
    let mut total: usize = widths.iter().sum();
    while total > budget {
        let widest = widths
            .iter()
            .enumerate()
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index)?;
        if widths[widest] <= MIN_TABLE_COLUMN_WIDTH {
            return None;
        }
        widths[widest] -= 1;
        total -= 1;
    }

    Some(widths)
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = widths.get(index).copied().unwrap_or(MIN_TABLE_COLUMN_WIDTH);
        let raw = cells.get(index).map(String::as_str).unwrap_or_default();
        let value = truncate_to(raw, width);
        let padding = width.saturating_sub(value.chars().count());
        let cell = match column.align {
            Align::Left => format!("{value}{}", " ".repeat(padding)),
            Align::Right => format!("{}{value}", " ".repeat(padding)),
        };
        parts.push(cell);
    }
    let indent = " ".repeat(INDENT);
    let gap = " ".repeat(COLUMN_GAP);
    format!("{indent}{}", parts.join(&gap))
        .trim_end()
        .to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let mut output: Vec<String> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", index + 1));
        for (column_index, column) in columns.iter().enumerate() {
            let value = row
                .get(column_index)
                .map(String::as_str)
                .unwrap_or_default();
            output.push(format!("    {}: {value}", column.name));
        }
    }
    output
}

fn truncate_to(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return value.chars().take(width).collect();
    }
    let mut truncated: String = value.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}
