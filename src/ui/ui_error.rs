use super::*;

const MESSAGE_ROWS: u16 = 3;

/// Error text above the last good snapshot, which stays browsable.
pub(super) fn draw_error(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
    now: Instant,
    theme: &ThemePalette,
) {
    let width = area.width as usize;
    let alias = app
        .active_query()
        .map(|query| query.alias.clone())
        .unwrap_or_default();
    let error = app
        .last_error()
        .map(|error| error.to_string())
        .unwrap_or_else(|| "unknown error".to_string());
    let retry = format!(
        "Retrying in {}s · press {} to retry now",
        app.clock().remaining(now).as_secs(),
        app.keybinds().label(Command::Refresh)
    );

    let lines = vec![
        Line::from(Span::styled(
            truncate(&format!("Could not refresh {}", alias), width),
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&error, width),
            Style::default().fg(theme.danger),
        )),
        Line::from(Span::styled(
            truncate(&retry, width),
            Style::default().fg(theme.text_muted),
        )),
    ];
    let (message_area, list_area) = split_top(area, MESSAGE_ROWS);
    draw_lines(frame, lines, message_area);
    draw_overview(frame, app, list_area, theme);
}

pub(super) fn error_list_area(body: Rect) -> Rect {
    split_top(body, MESSAGE_ROWS).1
}
