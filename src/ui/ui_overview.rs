use super::*;
use crate::issue::{DisplayRecord, Issue, RenderFault, format_issue};

/// List rows left in `area` once the selected issue's details take their
/// share. `None` when there is no room for the list at all.
pub(super) fn overview_list_rows(app: &App, area: Rect) -> Option<usize> {
    let height = area.height as usize;
    if height == 0 {
        return None;
    }
    if app.snapshot().is_empty() {
        return Some(0);
    }
    let detail = app
        .selected_issue()
        .map(|issue| detail_lines(issue, area.width as usize, app.theme()).len())
        .unwrap_or(0);
    Some(height - 1 - detail_height(detail, height))
}

fn detail_height(detail: usize, height: usize) -> usize {
    detail.min(height.saturating_sub(2))
}

/// Issue table with the selected issue's details underneath. Expects the
/// viewport to be fitted to `overview_list_rows` for the same area.
pub(super) fn draw_overview(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let width = area.width as usize;
    let height = area.height as usize;
    if height == 0 {
        return;
    }
    let config = app.config();
    if app.snapshot().is_empty() {
        let widths = layout::column_widths(
            &config.columns,
            std::iter::empty::<&DisplayRecord>(),
            width,
        );
        let header = layout::header_line(&config.columns, &widths, width);
        draw_lines(frame, vec![header_row(header, theme)], area);
        return;
    }

    let detail = app
        .selected_issue()
        .map(|issue| detail_lines(issue, width, theme))
        .unwrap_or_default();
    let detail_rows = detail_height(detail.len(), height);
    let list_rows = height - 1 - detail_rows;

    let issues = &app.snapshot().issues;
    let visible = app.view().visible_range(issues.len(), list_rows);
    let selected = app.selected_index();
    let formatted = issues[visible.clone()]
        .iter()
        .map(|issue| format_issue(issue, &config.columns, &config.date_format))
        .collect::<Vec<Result<DisplayRecord, RenderFault>>>();
    let widths = layout::column_widths(
        &config.columns,
        formatted.iter().filter_map(|record| record.as_ref().ok()),
        width,
    );

    let mut lines = vec![header_row(
        layout::header_line(&config.columns, &widths, width),
        theme,
    )];
    for (index, record) in visible.zip(&formatted) {
        let (text, color) = match record {
            Ok(record) => (
                layout::record_line(record, &config.columns, &widths, width),
                theme.text_primary,
            ),
            Err(fault) => (truncate(&fault.to_string(), width), theme.danger),
        };
        let mut style = Style::default().fg(color);
        if Some(index) == selected {
            style = style.bg(theme.bg_selected).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(text, style)));
    }

    let (list_area, detail_area) = split_top(area, (1 + list_rows) as u16);
    draw_lines(frame, lines, list_area);
    draw_lines(
        frame,
        detail.into_iter().take(detail_rows).collect(),
        detail_area,
    );
}

fn header_row(text: String, theme: &ThemePalette) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.column_header)
            .add_modifier(Modifier::BOLD),
    ))
}

fn detail_lines(issue: &Issue, width: usize, theme: &ThemePalette) -> Vec<Line<'static>> {
    let summary = issue.summary.split_whitespace().collect::<Vec<&str>>().join(" ");
    let watchers = issue
        .watchers
        .map(|count| count.to_string())
        .unwrap_or_else(|| "-".to_string());
    let meta = format!(
        "{} · assignee {} · creator {} · {} watching",
        issue.status,
        issue.assignee.as_deref().unwrap_or("unassigned"),
        issue.creator,
        watchers
    );

    let mut lines = vec![
        Line::from(Span::styled(
            truncate(&format!("{} {}", issue.key, summary), width),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&meta, width),
            Style::default().fg(theme.text_muted),
        )),
    ];
    if let Some(description) = issue.description.as_deref() {
        lines.push(Line::from(""));
        lines.extend(
            layout::wrap_description(description, width)
                .into_iter()
                .map(|line| {
                    Line::from(Span::styled(line, Style::default().fg(theme.text_primary)))
                }),
        );
    }
    lines
}
