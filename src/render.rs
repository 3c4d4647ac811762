//! Plain-text rendering for summaries and character listings.

use crate::characters::CharacterScan;

/// Render rows as a boxed ASCII table.
///
/// Example output:
/// ```text
/// Scan Summary
/// +-------+-------+
/// | Item  | Value |
/// +-------+-------+
/// | Files | 2     |
/// +-------+-------+
/// ```
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths = vec![0usize; columns];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = widths[i].max(header.chars().count());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    if !title.is_empty() {
        output.push_str(title);
        output.push('\n');
    }

    let separator = render_separator(&widths);
    output.push_str(&separator);
    if !headers.is_empty() {
        render_row(&mut output, headers.iter().copied(), &widths);
        output.push_str(&separator);
    }
    for row in rows {
        render_row(&mut output, row.iter().map(String::as_str), &widths);
    }
    if !rows.is_empty() {
        output.push_str(&separator);
    }
    output
}

fn render_separator(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn render_row<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let cells: Vec<&str> = cells.collect();
    output.push('|');
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).copied().unwrap_or("");
        let padding = width - cell.chars().count();
        output.push(' ');
        output.push_str(cell);
        output.push_str(&" ".repeat(padding + 1));
        output.push('|');
    }
    output.push('\n');
}

/// One line per storyboard file listing its character names in discovery order.
/// Files without characters are omitted.
pub fn render_file_characters(scan: &CharacterScan) -> String {
    let mut output = String::new();
    for (file, names) in &scan.per_file {
        if names.is_empty() {
            continue;
        }
        let names: Vec<&str> = names.keys().map(String::as_str).collect();
        output.push_str(&format!(" • {}: {}\n", file, names.join(", ")));
    }
    output
}

/// Comma-separated list truncated to `max` items, with `...` when truncated.
pub fn render_truncated(items: &[String], max: usize) -> String {
    let shown: Vec<&str> = items.iter().take(max).map(String::as_str).collect();
    let mut output = shown.join(", ");
    if items.len() > max {
        output.push_str("...");
    }
    output
}
