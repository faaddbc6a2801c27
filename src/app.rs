use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{Config, QueryConfig};
use crate::issue::{Issue, IssueSnapshot, Transition, UserId};
use crate::keybinds::{Command, Keybinds};
use crate::theme::{ThemePalette, resolve_theme};
use crate::tracker::FetchError;

mod clock;
mod input;
mod mode;
mod state;
mod viewport;

#[cfg(test)]
mod tests;

pub use clock::{PROGRESS_WIDTH, RefreshClock, progress_bar};
pub use mode::{Mode, ModeInput};
pub use viewport::ViewState;

/// Side effects requested by key handling, executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    ReloadConfig,
    OpenPermalink { url: String },
    LoadTransitions { issue_key: String },
    ApplyTransition {
        issue_key: String,
        transition: Transition,
    },
    AssignToSelf {
        issue_key: String,
        user: Option<UserId>,
    },
}

/// Query the event loop should fetch next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub alias: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPrompt {
    pub issue_key: String,
    /// `None` while the available transitions are still loading.
    pub choices: Option<Vec<Transition>>,
    pub input: String,
}

/// Outcome of submitting the transition prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionChoice {
    Cancelled,
    Invalid(String),
    Chosen(Transition),
}

impl TransitionPrompt {
    pub fn resolve(&self) -> TransitionChoice {
        let input = self.input.trim();
        if input.is_empty() {
            return TransitionChoice::Cancelled;
        }
        let choices = self.choices.as_deref().unwrap_or_default();
        choices
            .iter()
            .find(|choice| choice.id == input)
            .or_else(|| {
                choices
                    .iter()
                    .find(|choice| choice.name.eq_ignore_ascii_case(input))
            })
            .cloned()
            .map(TransitionChoice::Chosen)
            .unwrap_or_else(|| TransitionChoice::Invalid(input.to_string()))
    }
}

pub struct App {
    should_quit: bool,
    config: Config,
    keybinds: Keybinds,
    theme: &'static ThemePalette,
    mode: Mode,
    snapshot: IssueSnapshot,
    view: ViewState,
    clock: RefreshClock,
    active_query: usize,
    refresh_requested: bool,
    fetching: bool,
    jobs_in_flight: usize,
    last_error: Option<FetchError>,
    status: String,
    transition: Option<TransitionPrompt>,
    current_user: Option<UserId>,
    action: Option<AppAction>,
}

impl App {
    pub fn new(config: Config, now: Instant) -> Self {
        let keybinds = Keybinds::from_overrides(&config.keys);
        let theme = resolve_theme(config.theme.as_deref());
        let clock = RefreshClock::new(Duration::from_secs(config.refresh_interval_secs), now);
        let snapshot = config
            .queries
            .first()
            .map(|query| IssueSnapshot::new(query.alias.as_str(), query.query.as_str(), Vec::new()))
            .unwrap_or_default();
        Self {
            should_quit: false,
            config,
            keybinds,
            theme,
            mode: Mode::Overview,
            snapshot,
            view: ViewState::default(),
            clock,
            active_query: 0,
            refresh_requested: true,
            fetching: false,
            jobs_in_flight: 0,
            last_error: None,
            status: String::new(),
            transition: None,
            current_user: None,
            action: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn keybinds(&self) -> &Keybinds {
        &self.keybinds
    }

    pub fn theme(&self) -> &'static ThemePalette {
        self.theme
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn snapshot(&self) -> &IssueSnapshot {
        &self.snapshot
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn clock(&self) -> &RefreshClock {
        &self.clock
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn fetching(&self) -> bool {
        self.fetching
    }

    /// Whether any background job (fetch or action) has not reported back.
    pub fn busy(&self) -> bool {
        self.fetching || self.jobs_in_flight > 0
    }

    pub fn transition_prompt(&self) -> Option<&TransitionPrompt> {
        self.transition.as_ref()
    }

    pub fn active_query(&self) -> Option<&QueryConfig> {
        self.config.queries.get(self.active_query)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.view.selected(self.snapshot.len())
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.selected_index()
            .and_then(|index| self.snapshot.get(index))
    }

    pub fn take_action(&mut self) -> Option<AppAction> {
        self.action.take()
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    #[cfg(test)]
    pub fn refresh_requested(&self) -> bool {
        self.refresh_requested
    }

    /// A keypress counts as activity and restarts the refresh countdown.
    pub fn note_activity(&mut self, now: Instant) {
        self.clock.reset(now);
    }

    /// Timer check for one loop iteration. Sets the refresh flag once the
    /// interval has passed. The timer is idle while a fetch is in flight; the
    /// completion resets the clock, so the next interval starts from there.
    pub fn on_tick(&mut self, now: Instant) {
        if self.fetching || !self.mode.polls() || !self.clock.is_due(now) {
            return;
        }
        self.request_refresh();
        self.clock.reset(now);
    }

    /// Claims the pending refresh if no fetch is in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchRequest> {
        if self.fetching || !self.refresh_requested {
            return None;
        }
        let query = self.active_query()?;
        let request = FetchRequest {
            alias: query.alias.clone(),
            query: query.query.clone(),
        };
        self.refresh_requested = false;
        self.fetching = true;
        Some(request)
    }

    pub fn fit_viewport(&mut self, list_rows: usize) {
        self.view.fit(self.snapshot.len(), list_rows);
    }

    pub fn clamp_view(&mut self) {
        self.view.clamp(self.snapshot.len());
    }

    fn apply(&mut self, input: ModeInput) {
        self.mode = self.mode.next(input);
    }
}
