use super::*;

/// Keeps a widget area inside the frame; anything outside is dropped.
pub(super) fn clip(area: Rect, bounds: Rect) -> Rect {
    area.intersection(bounds)
}

pub(super) fn key_cap(key: &str, theme: &ThemePalette) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .fg(theme.column_header)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
    )
}

/// Splits `area` into a top part and a bottom strip of at most `rows` lines.
pub(super) fn split_bottom(area: Rect, rows: u16) -> (Rect, Rect) {
    let rows = rows.min(area.height);
    let top = Rect {
        height: area.height - rows,
        ..area
    };
    let bottom = Rect {
        y: area.y + area.height - rows,
        height: rows,
        ..area
    };
    (top, bottom)
}

/// Splits `area` into a top strip of at most `rows` lines and the rest.
pub(super) fn split_top(area: Rect, rows: u16) -> (Rect, Rect) {
    let rows = rows.min(area.height);
    let top = Rect {
        height: rows,
        ..area
    };
    let rest = Rect {
        y: area.y + rows,
        height: area.height - rows,
        ..area
    };
    (top, rest)
}

pub(super) fn draw_lines(frame: &mut Frame<'_>, lines: Vec<Line<'static>>, area: Rect) {
    if area.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(lines), area);
}
