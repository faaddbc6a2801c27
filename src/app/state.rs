use tracing::{debug, warn};

use super::*;

const REFRESHING: &str = "Refreshing...";

impl App {
    /// Installs a finished search. Results for a query that is no longer
    /// active are dropped; the pending refresh for the new query stands.
    pub fn on_fetch_succeeded(
        &mut self,
        alias: &str,
        query: &str,
        issues: Vec<Issue>,
        now: Instant,
    ) {
        self.fetching = false;
        self.clock.reset(now);
        if !self.is_active(alias, query) {
            debug!(alias, "dropping results for inactive query");
            return;
        }

        let selected_key = self.selected_issue().map(|issue| issue.key.clone());
        self.snapshot = IssueSnapshot::new(alias, query, issues);
        let len = self.snapshot.len();
        match selected_key.and_then(|key| {
            self.snapshot
                .issues
                .iter()
                .position(|issue| issue.key == key)
        }) {
            Some(index) => self.view.select(index, len),
            None => self.view.clamp(len),
        }

        self.last_error = None;
        if self.status == REFRESHING {
            self.status.clear();
        }
        self.apply(ModeInput::FetchSucceeded);
    }

    /// Keeps the stale snapshot on screen and waits for the next tick.
    pub fn on_fetch_failed(&mut self, error: FetchError, now: Instant) {
        self.fetching = false;
        self.clock.reset(now);
        warn!(error = %error, "fetch failed");
        if self.mode == Mode::Transition {
            self.status = format!("Refresh failed: {}", error);
        } else if self.status == REFRESHING {
            self.status.clear();
        }
        self.last_error = Some(error);
        self.apply(ModeInput::FetchFailed);
    }

    pub fn set_transitions(
        &mut self,
        issue_key: &str,
        result: Result<Vec<Transition>, FetchError>,
    ) {
        self.job_finished();
        let Some(prompt) = self
            .transition
            .as_mut()
            .filter(|prompt| prompt.issue_key == issue_key)
        else {
            return;
        };

        match result {
            Ok(choices) => {
                if choices.is_empty() {
                    self.status = format!("No transitions available for {}", issue_key);
                }
                prompt.choices = Some(choices);
            }
            Err(error) => {
                self.finish_transition(format!(
                    "Could not load transitions for {}: {}",
                    issue_key, error
                ));
                self.record_error(error);
            }
        }
    }

    pub fn on_transition_applied(&mut self, issue_key: &str, transition: &Transition) {
        self.job_finished();
        self.status = format!("Moved {} to {}", issue_key, transition.name);
        self.request_refresh();
    }

    pub fn on_assigned(&mut self, issue_key: &str) {
        self.job_finished();
        self.status = format!("Assigned {} to you", issue_key);
        self.request_refresh();
    }

    pub fn on_action_failed(&mut self, context: &str, error: FetchError) {
        self.job_finished();
        self.status = format!("{}: {}", context, error);
        self.record_error(error);
    }

    pub fn set_current_user(&mut self, user: UserId) {
        self.current_user = Some(user);
    }

    pub fn job_started(&mut self) {
        self.jobs_in_flight += 1;
    }

    fn job_finished(&mut self) {
        self.jobs_in_flight = self.jobs_in_flight.saturating_sub(1);
    }

    /// Swaps in a reloaded configuration. The active query alias survives
    /// when the new file still defines it; otherwise the first query wins.
    pub fn apply_config(&mut self, config: Config) {
        let previous_alias = self.active_query().map(|query| query.alias.clone());
        let server_changed = self.config.server_url() != config.server_url();

        self.keybinds = Keybinds::from_overrides(&config.keys);
        self.theme = resolve_theme(config.theme.as_deref());
        self.clock
            .set_interval(Duration::from_secs(config.refresh_interval_secs));
        self.active_query = previous_alias
            .as_deref()
            .and_then(|alias| config.query_index(alias))
            .unwrap_or(0);
        self.config = config;

        if self.is_active(&self.snapshot.alias, &self.snapshot.query) {
            self.request_refresh();
        } else {
            self.select_query(self.active_query);
        }

        self.status = if server_changed {
            "Configuration reloaded; restart to switch servers".to_string()
        } else {
            "Configuration reloaded".to_string()
        };
    }

    fn is_active(&self, alias: &str, query: &str) -> bool {
        self.active_query()
            .is_some_and(|active| active.alias == alias && active.query == query)
    }

    fn record_error(&mut self, error: FetchError) {
        warn!(error = %error, "tracker action failed");
        self.last_error = Some(error);
        self.apply(ModeInput::FetchFailed);
    }
}
