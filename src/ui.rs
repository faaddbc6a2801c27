use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{App, Mode, PROGRESS_WIDTH, progress_bar};
use crate::keybinds::Command;
use crate::layout::{self, display_width, truncate};
use crate::theme::ThemePalette;

mod ui_error;
mod ui_help;
mod ui_overview;
mod ui_shared;
mod ui_transition;

use ui_error::{draw_error, error_list_area};
use ui_help::draw_help;
use ui_overview::{draw_overview, overview_list_rows};
use ui_shared::*;
use ui_transition::{draw_transition, transition_list_area};

/// Draws one frame from a read-only view of the session. The frame size is
/// read once and every widget area is clipped against it.
pub fn draw(frame: &mut Frame<'_>, app: &App, now: Instant) {
    let bounds = frame.area();
    let theme = app.theme();
    let [title, body, footer, status] = frame_areas(bounds);

    draw_title_bar(frame, app, title);
    match app.mode() {
        Mode::Overview => draw_overview(frame, app, body, theme),
        Mode::Help { .. } => draw_help(frame, app, body, theme),
        Mode::Transition => draw_transition(frame, app, body, theme),
        Mode::Error => draw_error(frame, app, body, now, theme),
    }
    draw_footer(frame, app, footer, now, theme);
    draw_status_line(frame, app, status, theme);
}

/// Issue list rows the next frame of `size` will show, or `None` when the
/// current mode shows no list. The loop fits the viewport to this before
/// drawing.
pub fn list_rows(app: &App, size: Rect) -> Option<usize> {
    let [_, body, _, _] = frame_areas(size);
    let list_area = match app.mode() {
        Mode::Overview => body,
        Mode::Help { .. } => return None,
        Mode::Transition => transition_list_area(body),
        Mode::Error => error_list_area(body),
    };
    overview_list_rows(app, list_area)
}

fn frame_areas(bounds: Rect) -> [Rect; 4] {
    let areas: [Rect; 4] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(bounds);
    areas.map(|area| clip(area, bounds))
}

fn draw_title_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let alias = app
        .active_query()
        .map(|query| query.alias.as_str())
        .unwrap_or("-");
    let mut title = format!(
        " jiradash {} │ {} │ {} issues │ {}",
        env!("CARGO_PKG_VERSION"),
        alias,
        app.snapshot().len(),
        app.mode().label()
    );
    if app.fetching() {
        title.push_str(" │ refreshing…");
    }

    let line = Line::from(truncate(&title, area.width as usize));
    frame.render_widget(
        Paragraph::new(line).style(Style::default().add_modifier(Modifier::REVERSED)),
        area,
    );
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect, now: Instant, theme: &ThemePalette) {
    let width = area.width as usize;
    frame.render_widget(Clear, area);

    if app.mode() == Mode::Error
        && let Some(error) = app.last_error()
    {
        let banner = truncate(&format!(" ERROR {}", error), width);
        frame.render_widget(
            Paragraph::new(Line::from(banner)).style(
                Style::default()
                    .fg(theme.on_danger)
                    .bg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            ),
            area,
        );
        return;
    }

    let bar = progress_bar(app.clock().progress(now), PROGRESS_WIDTH);
    let query = app
        .active_query()
        .map(|query| format!("{}: {}", query.alias, query.query))
        .unwrap_or_default();
    let query = truncate(&query, width.saturating_sub(display_width(&bar) + 1));
    let line = Line::from(vec![
        Span::styled(bar, Style::default().fg(theme.progress)),
        Span::raw(" "),
        Span::styled(query, Style::default().fg(theme.text_muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_status_line(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let width = area.width as usize;
    let line = if app.status().is_empty() {
        let keys = app.keybinds();
        let hint = format!(
            "{} help · {} refresh · {} quit",
            keys.label(Command::ToggleHelp),
            keys.label(Command::Refresh),
            keys.label(Command::Quit)
        );
        Line::from(Span::styled(
            truncate(&hint, width),
            Style::default().fg(theme.text_muted),
        ))
    } else {
        Line::from(Span::styled(
            truncate(app.status(), width),
            Style::default().fg(theme.status),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
