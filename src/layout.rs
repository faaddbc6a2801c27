//! Column layout and text fitting for the issue list and detail pane.
//!
//! Everything here is a pure function of its inputs; widths are measured in
//! terminal cells, not bytes or chars.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Column;
use crate::issue::DisplayRecord;

pub const ELLIPSIS: char = '…';
pub const COLUMN_GAP: usize = 2;
pub const MIN_FREE_TEXT_WIDTH: usize = 10;
pub const MAX_DESCRIPTION_LINES: usize = 10;

pub fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

/// Width of every column. Fixed columns take the widest of their header and
/// cells; the free-text column takes whatever the terminal has left.
pub fn column_widths<'a>(
    columns: &[Column],
    records: impl IntoIterator<Item = &'a DisplayRecord>,
    terminal_width: usize,
) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| display_width(column.label()))
        .collect::<Vec<usize>>();
    for record in records {
        for (index, column) in columns.iter().enumerate() {
            widths[index] = widths[index].max(display_width(record.cell(*column)));
        }
    }

    let fixed_total = columns
        .iter()
        .zip(&widths)
        .filter(|(column, _)| !column.is_free_text())
        .map(|(_, width)| *width)
        .sum::<usize>();
    let gaps = COLUMN_GAP * columns.len().saturating_sub(1);
    let free_width = terminal_width
        .saturating_sub(fixed_total + gaps)
        .max(MIN_FREE_TEXT_WIDTH);
    for (index, column) in columns.iter().enumerate() {
        if column.is_free_text() {
            widths[index] = free_width;
        }
    }
    widths
}

pub fn header_line(columns: &[Column], widths: &[usize], terminal_width: usize) -> String {
    compose_line(
        columns.iter().map(|column| column.label()),
        widths,
        terminal_width,
    )
}

pub fn record_line(
    record: &DisplayRecord,
    columns: &[Column],
    widths: &[usize],
    terminal_width: usize,
) -> String {
    compose_line(
        columns.iter().map(|column| record.cell(*column)),
        widths,
        terminal_width,
    )
}

pub fn compose_line<'a>(
    cells: impl IntoIterator<Item = &'a str>,
    widths: &[usize],
    terminal_width: usize,
) -> String {
    let gap = " ".repeat(COLUMN_GAP);
    let line = cells
        .into_iter()
        .zip(widths)
        .map(|(cell, width)| fit_cell(cell, *width))
        .collect::<Vec<String>>()
        .join(gap.as_str());
    truncate(&line, terminal_width)
}

/// Pads or truncates `value` to exactly `width` cells.
pub fn fit_cell(value: &str, width: usize) -> String {
    let mut cell = truncate(value, width);
    let used = display_width(&cell);
    cell.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    cell
}

/// Cuts `value` down to at most `width` cells, marking the cut with an ellipsis.
pub fn truncate(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0usize;
    let mut out = String::new();
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

pub fn wrap_description(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for source in text.lines() {
        if lines.len() >= MAX_DESCRIPTION_LINES {
            break;
        }
        if source.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        wrap_words(source, width, &mut lines);
    }
    lines.truncate(MAX_DESCRIPTION_LINES);
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn wrap_words(source: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;
    for word in source.split_whitespace() {
        let word_width = display_width(word);
        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunks = split_word(word, width);
            let last = chunks.pop().unwrap_or_default();
            lines.extend(chunks);
            current_width = display_width(&last);
            current = last;
            continue;
        }
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }
        lines.push(std::mem::replace(&mut current, word.to_string()));
        current_width = word_width;
    }
    if !current.is_empty() {
        lines.push(current);
    }
}

fn split_word(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut used = 0usize;
    for ch in word.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            used = 0;
        }
        chunk.push(ch);
        used += ch_width;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::{
        ELLIPSIS, MAX_DESCRIPTION_LINES, column_widths, display_width, fit_cell, header_line,
        record_line, truncate, wrap_description,
    };
    use crate::config::Column;
    use crate::issue::DisplayRecord;

    fn records() -> Vec<DisplayRecord> {
        vec![
            DisplayRecord::from_cells(&[
                (Column::Key, "OPS-101"),
                (Column::Status, "In Progress"),
                (Column::Summary, "Rotate the staging certificates before Friday"),
            ]),
            DisplayRecord::from_cells(&[
                (Column::Key, "OPS-7"),
                (Column::Status, "Done"),
                (Column::Summary, "Short"),
            ]),
        ]
    }

    #[test]
    fn summary_takes_remaining_width() {
        let columns = [Column::Key, Column::Status, Column::Summary];
        let ten = "x".repeat(10);
        let record = DisplayRecord::from_cells(&[
            (Column::Key, ten.as_str()),
            (Column::Status, ten.as_str()),
            (Column::Summary, "anything"),
        ]);

        let widths = column_widths(&columns, [&record], 40);

        assert_eq!(widths, vec![10, 10, 16]);
    }

    #[test]
    fn summary_width_is_floored() {
        let columns = [Column::Key, Column::Status, Column::Summary];
        let widths = column_widths(&columns, &records(), 20);

        assert_eq!(widths[2], 10);
    }

    #[test]
    fn fixed_columns_fit_header_and_widest_cell() {
        let columns = [Column::Key, Column::Status, Column::Watchers];
        let widths = column_widths(&columns, &records(), 80);

        assert_eq!(widths, vec![7, 11, "Watchers".len()]);
    }

    #[test]
    fn truncation_yields_exact_width_ending_with_ellipsis() {
        for width in 1..12 {
            let value = "abcdefghijklmnop";
            let cell = fit_cell(value, width);
            assert_eq!(display_width(&cell), width);
            assert!(cell.ends_with(ELLIPSIS));
        }
        assert_eq!(fit_cell("abc", 5), "abc  ");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn truncation_respects_wide_characters() {
        let cell = fit_cell("日本語のテキスト", 6);
        assert_eq!(display_width(&cell), 6);
        assert!(cell.contains(ELLIPSIS));
    }

    #[test]
    fn composed_lines_never_exceed_terminal_width() {
        let columns = [Column::Key, Column::Status, Column::Summary];
        let records = records();
        for width in [0usize, 5, 12, 24, 40, 120] {
            let widths = column_widths(&columns, &records, width);
            let header = header_line(&columns, &widths, width);
            assert!(display_width(&header) <= width);
            for record in &records {
                let line = record_line(record, &columns, &widths, width);
                assert!(display_width(&line) <= width, "width {width}: {line}");
            }
        }
    }

    #[test]
    fn layout_is_idempotent() {
        let columns = [Column::Key, Column::Status, Column::Summary];
        let records = records();
        let render = || {
            let widths = column_widths(&columns, &records, 48);
            records
                .iter()
                .map(|record| record_line(record, &columns, &widths, 48))
                .collect::<Vec<String>>()
        };

        assert_eq!(render(), render());
    }

    #[test]
    fn wraps_words_greedily_and_keeps_blank_separators() {
        let text = "the quick brown fox jumps\n\nover the lazy dog";
        let lines = wrap_description(text, 10);

        assert_eq!(
            lines,
            vec!["the quick", "brown fox", "jumps", "", "over the", "lazy dog"]
        );
    }

    #[test]
    fn splits_words_longer_than_width() {
        let lines = wrap_description("see https://example.net/very/long/path ok", 12);

        assert_eq!(
            lines,
            vec!["see", "https://exam", "ple.net/very", "/long/path", "ok"]
        );
        assert!(lines.iter().all(|line| display_width(line) <= 12));
    }

    #[test]
    fn caps_line_count_and_trims_trailing_blanks() {
        let text = (0..30).map(|n| format!("line {}", n)).collect::<Vec<_>>().join("\n");
        assert_eq!(wrap_description(&text, 80).len(), MAX_DESCRIPTION_LINES);

        let text = "one\r\n\r\n\r\n";
        assert_eq!(wrap_description(text, 80), vec!["one"]);

        let text = "\n".repeat(9) + "tail";
        let lines = wrap_description(&text, 80);
        assert_eq!(lines.len(), MAX_DESCRIPTION_LINES);
        assert_eq!(lines.last().map(String::as_str), Some("tail"));
    }
}
