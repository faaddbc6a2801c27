use super::*;

/// Results reported back to the loop by background jobs.
#[derive(Debug)]
pub(super) enum AppEvent {
    FetchFinished {
        alias: String,
        query: String,
        result: Result<Vec<Issue>, FetchError>,
    },
    TransitionsLoaded {
        issue_key: String,
        result: Result<Vec<Transition>, FetchError>,
    },
    TransitionApplied {
        issue_key: String,
        transition: Transition,
        result: Result<(), FetchError>,
    },
    AssignFinished {
        issue_key: String,
        user: Option<UserId>,
        result: Result<(), FetchError>,
    },
    CurrentUserLoaded(Result<UserId, FetchError>),
}

pub(super) fn handle_events(app: &mut App, event_rx: &Receiver<AppEvent>) {
    while let Ok(event) = event_rx.try_recv() {
        handle_event(app, event, Instant::now());
    }
}

pub(super) fn handle_event(app: &mut App, event: AppEvent, now: Instant) {
    match event {
        AppEvent::FetchFinished {
            alias,
            query,
            result,
        } => match result {
            Ok(issues) => {
                info!(alias = %alias, count = issues.len(), "fetch succeeded");
                app.on_fetch_succeeded(&alias, &query, issues, now);
            }
            Err(error) => app.on_fetch_failed(error, now),
        },
        AppEvent::TransitionsLoaded { issue_key, result } => {
            app.set_transitions(&issue_key, result);
        }
        AppEvent::TransitionApplied {
            issue_key,
            transition,
            result,
        } => match result {
            Ok(()) => {
                info!(issue = %issue_key, transition = %transition.name, "transition applied");
                app.on_transition_applied(&issue_key, &transition);
            }
            Err(error) => app.on_action_failed(
                &format!("Could not move {} to {}", issue_key, transition.name),
                error,
            ),
        },
        AppEvent::AssignFinished {
            issue_key,
            user,
            result,
        } => {
            if let Some(user) = user {
                app.set_current_user(user);
            }
            match result {
                Ok(()) => {
                    info!(issue = %issue_key, "assigned to current user");
                    app.on_assigned(&issue_key);
                }
                Err(error) => {
                    app.on_action_failed(&format!("Could not assign {}", issue_key), error)
                }
            }
        }
        AppEvent::CurrentUserLoaded(result) => match result {
            Ok(user) => {
                debug!(user = user.as_str(), "resolved current user");
                app.set_current_user(user);
            }
            Err(error) => warn!(error = %error, "could not resolve current user"),
        },
    }
}
