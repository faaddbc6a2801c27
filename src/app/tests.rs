pub(super) use std::time::{Duration, Instant};

pub(super) use super::mode::Resume;
pub(super) use super::{App, AppAction, Mode, TransitionChoice, TransitionPrompt};
pub(super) use crate::config::Config;
pub(super) use crate::issue::{Issue, Transition, UserId, test_issue};
pub(super) use crate::tracker::FetchError;
pub(super) use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};


pub(super) const TWO_QUERIES: &str = r#"
    [server]
    url = "https://example.atlassian.net"

    [[queries]]
    alias = "mine"
    query = "assignee = currentUser()"

    [[queries]]
    alias = "team"
    query = "project = OPS"
"#;

pub(super) fn config(contents: &str) -> Config {
    Config::parse(contents).expect("config parses")
}

pub(super) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub(super) fn press(app: &mut App, ch: char) {
    let modifiers = if ch.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    app.on_key(KeyEvent::new(KeyCode::Char(ch), modifiers));
}

pub(super) fn issues(count: usize) -> Vec<Issue> {
    (1..=count)
        .map(|n| test_issue(&format!("OPS-{}", n), &format!("Issue {}", n)))
        .collect()
}

/// App whose first fetch has already been claimed and answered.
pub(super) fn loaded_app(count: usize, now: Instant) -> App {
    let mut app = App::new(config(TWO_QUERIES), now);
    let request = app.begin_fetch().expect("initial fetch");
    app.on_fetch_succeeded(&request.alias, &request.query, issues(count), now);
    app
}
