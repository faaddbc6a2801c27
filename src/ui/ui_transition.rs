use super::*;

const PROMPT_ROWS: u16 = 3;

pub(super) fn transition_list_area(body: Rect) -> Rect {
    split_bottom(body, PROMPT_ROWS).0
}

pub(super) fn draw_transition(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
    theme: &ThemePalette,
) {
    let (list_area, prompt_area) = split_bottom(area, PROMPT_ROWS);
    draw_overview(frame, app, list_area, theme);

    let Some(prompt) = app.transition_prompt() else {
        return;
    };
    let width = prompt_area.width as usize;
    let label = format!("Transition {} › ", prompt.issue_key);
    let choices = match prompt.choices.as_deref() {
        None => "Loading transitions…".to_string(),
        Some([]) => "No transitions available".to_string(),
        Some(choices) => choices
            .iter()
            .map(|choice| format!("{} {}", choice.id, choice.name))
            .collect::<Vec<String>>()
            .join(" · "),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                truncate(&label, width),
                Style::default()
                    .fg(theme.column_header)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                truncate(&prompt.input, width.saturating_sub(display_width(&label))),
                Style::default().fg(theme.text_primary),
            ),
        ]),
        Line::from(Span::styled(
            truncate(&choices, width),
            Style::default().fg(theme.text_muted),
        )),
        Line::from(Span::styled(
            truncate("enter apply · esc cancel · empty input cancels", width),
            Style::default().fg(theme.text_muted),
        )),
    ];

    if !prompt_area.is_empty() {
        let cursor = display_width(&label) + display_width(&prompt.input);
        let cursor_x = prompt_area
            .x
            .saturating_add(cursor as u16)
            .min(prompt_area.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, prompt_area.y));
    }
    draw_lines(frame, lines, prompt_area);
}
