use super::*;

pub(super) fn handle_actions(
    app: &mut App,
    runtime: &Handle,
    tracker: &SharedTracker,
    event_tx: &Sender<AppEvent>,
) {
    let Some(action) = app.take_action() else {
        return;
    };

    match action {
        AppAction::ReloadConfig => match Config::load() {
            Ok(config) => {
                info!("configuration reloaded");
                app.apply_config(config);
            }
            Err(error) => {
                warn!(error = %error, "configuration reload rejected");
                app.set_status(format!("Reload rejected: {}", error));
            }
        },
        AppAction::OpenPermalink { url } => {
            opener::open_url(&app.config().open_command, &url);
            app.set_status(format!("Opened {}", url));
        }
        AppAction::LoadTransitions { issue_key } => {
            app.job_started();
            start_load_transitions(runtime, tracker.clone(), issue_key, event_tx.clone());
        }
        AppAction::ApplyTransition {
            issue_key,
            transition,
        } => {
            app.job_started();
            start_apply_transition(
                runtime,
                tracker.clone(),
                issue_key,
                transition,
                event_tx.clone(),
            );
        }
        AppAction::AssignToSelf { issue_key, user } => {
            app.job_started();
            start_assign(runtime, tracker.clone(), issue_key, user, event_tx.clone());
        }
    }
}

/// Starts the pending refresh unless one is already running.
pub(super) fn maybe_start_fetch(
    app: &mut App,
    runtime: &Handle,
    tracker: &SharedTracker,
    event_tx: &Sender<AppEvent>,
) {
    if let Some(request) = app.begin_fetch() {
        start_fetch(runtime, tracker.clone(), request, event_tx.clone());
    }
}

pub(super) fn start_fetch(
    runtime: &Handle,
    tracker: SharedTracker,
    request: FetchRequest,
    event_tx: Sender<AppEvent>,
) {
    runtime.spawn(async move {
        let started = Instant::now();
        let result = tracker.search(&request.query).await;
        debug!(
            alias = %request.alias,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "search finished"
        );
        let _ = event_tx.send(AppEvent::FetchFinished {
            alias: request.alias,
            query: request.query,
            result,
        });
    });
}

pub(super) fn start_load_transitions(
    runtime: &Handle,
    tracker: SharedTracker,
    issue_key: String,
    event_tx: Sender<AppEvent>,
) {
    runtime.spawn(async move {
        let result = tracker.list_transitions(&issue_key).await;
        let _ = event_tx.send(AppEvent::TransitionsLoaded { issue_key, result });
    });
}

pub(super) fn start_apply_transition(
    runtime: &Handle,
    tracker: SharedTracker,
    issue_key: String,
    transition: Transition,
    event_tx: Sender<AppEvent>,
) {
    runtime.spawn(async move {
        let result = tracker.apply_transition(&issue_key, &transition.id).await;
        let _ = event_tx.send(AppEvent::TransitionApplied {
            issue_key,
            transition,
            result,
        });
    });
}

/// Assigns the issue to the authenticated user, looking the user up first
/// when it is not known yet.
pub(super) fn start_assign(
    runtime: &Handle,
    tracker: SharedTracker,
    issue_key: String,
    user: Option<UserId>,
    event_tx: Sender<AppEvent>,
) {
    runtime.spawn(async move {
        let (resolved, result) = match user {
            Some(user) => {
                let result = tracker.assign(&issue_key, &user).await;
                (None, result)
            }
            None => match tracker.current_user().await {
                Ok(user) => {
                    let result = tracker.assign(&issue_key, &user).await;
                    (Some(user), result)
                }
                Err(error) => (None, Err(error)),
            },
        };
        let _ = event_tx.send(AppEvent::AssignFinished {
            issue_key,
            user: resolved,
            result,
        });
    });
}

pub(super) fn start_current_user(
    runtime: &Handle,
    tracker: SharedTracker,
    event_tx: Sender<AppEvent>,
) {
    runtime.spawn(async move {
        let result = tracker.current_user().await;
        let _ = event_tx.send(AppEvent::CurrentUserLoaded(result));
    });
}
