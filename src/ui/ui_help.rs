use super::*;

const KEY_COLUMN: usize = 9;

pub(super) fn draw_help(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let width = area.width as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            truncate("Keyboard shortcuts", width),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, description) in app.keybinds().help_rows() {
        let cap = layout::fit_cell(&key, KEY_COLUMN);
        let room = width.saturating_sub(KEY_COLUMN + 3);
        lines.push(Line::from(vec![
            key_cap(&cap, theme),
            Span::raw(" "),
            Span::styled(
                truncate(description, room),
                Style::default().fg(theme.text_primary),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        truncate(
            "Arrow keys, Home and End also navigate; ctrl+c always quits.",
            width,
        ),
        Style::default().fg(theme.text_muted),
    )));
    lines.push(Line::from(Span::styled(
        truncate(
            &format!(
                "Press {} or esc to go back.",
                app.keybinds().label(Command::ToggleHelp)
            ),
            width,
        ),
        Style::default().fg(theme.text_muted),
    )));
    draw_lines(frame, lines, area);
}
