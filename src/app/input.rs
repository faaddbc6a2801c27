use super::*;

impl App {
    pub fn on_key(&mut self, key: KeyEvent) {
        if is_interrupt(key) {
            self.should_quit = true;
            return;
        }
        match self.mode {
            Mode::Transition => self.handle_transition_key(key),
            Mode::Help { .. } => self.handle_help_key(key),
            Mode::Overview | Mode::Error => {
                if let Some(command) = self.keybinds.command_for(key) {
                    self.handle_command(command);
                }
            }
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.apply(ModeInput::ToggleHelp);
            return;
        }
        match self.keybinds.command_for(key) {
            Some(Command::ToggleHelp) => self.apply(ModeInput::ToggleHelp),
            Some(Command::Quit) => self.should_quit = true,
            _ => {}
        }
    }

    pub(super) fn handle_command(&mut self, command: Command) {
        let len = self.snapshot.len();
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.apply(ModeInput::ToggleHelp),
            Command::Refresh => self.force_refresh(),
            Command::ReloadConfig => self.action = Some(AppAction::ReloadConfig),
            Command::NextQuery => self.switch_query(1),
            Command::PreviousQuery => self.switch_query(-1),
            Command::Transition => self.begin_transition(),
            Command::AssignToSelf => {
                if let Some(issue) = self.selected_issue() {
                    let issue_key = issue.key.clone();
                    self.status = format!("Assigning {} to you...", issue_key);
                    self.action = Some(AppAction::AssignToSelf {
                        issue_key,
                        user: self.current_user.clone(),
                    });
                }
            }
            Command::OpenPermalink => {
                if let Some(issue) = self.selected_issue() {
                    self.action = Some(AppAction::OpenPermalink {
                        url: issue.permalink.clone(),
                    });
                }
            }
            Command::MoveDown => self.view.move_down(len),
            Command::MoveUp => self.view.move_up(),
            Command::JumpTop => self.view.jump_top(),
            Command::JumpBottom => self.view.jump_bottom(len),
            Command::ResetView => {
                self.view = ViewState::default();
                self.status.clear();
            }
        }
    }

    fn force_refresh(&mut self) {
        self.apply(ModeInput::ForceRefresh);
        self.request_refresh();
        self.status = "Refreshing...".to_string();
    }

    fn switch_query(&mut self, step: isize) {
        let count = self.config.queries.len();
        if count == 0 {
            return;
        }
        self.active_query = (self.active_query as isize + step).rem_euclid(count as isize) as usize;
        self.select_query(self.active_query);
    }

    pub(super) fn select_query(&mut self, index: usize) {
        self.active_query = index;
        if let Some(query) = self.config.queries.get(index) {
            self.snapshot =
                IssueSnapshot::new(query.alias.as_str(), query.query.as_str(), Vec::new());
        }
        self.view = ViewState::default();
        self.force_refresh();
    }

    fn begin_transition(&mut self) {
        if self.mode != Mode::Overview {
            return;
        }
        let Some(issue) = self.selected_issue() else {
            self.status = "No issue selected".to_string();
            return;
        };
        let issue_key = issue.key.clone();
        self.transition = Some(TransitionPrompt {
            issue_key: issue_key.clone(),
            choices: None,
            input: String::new(),
        });
        self.action = Some(AppAction::LoadTransitions { issue_key });
        self.apply(ModeInput::BeginTransition);
    }

    fn handle_transition_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.finish_transition("Transition cancelled".to_string()),
            KeyCode::Enter => self.submit_transition(),
            KeyCode::Backspace => {
                if let Some(prompt) = self.transition.as_mut() {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(prompt) = self.transition.as_mut() {
                    prompt.input.push(ch);
                }
            }
            _ => {}
        }
    }

    fn submit_transition(&mut self) {
        let Some(prompt) = self.transition.as_ref() else {
            self.finish_transition(String::new());
            return;
        };
        if prompt.choices.is_none() {
            return;
        }
        let issue_key = prompt.issue_key.clone();
        match prompt.resolve() {
            TransitionChoice::Cancelled => {
                self.finish_transition(format!("No transition chosen for {}", issue_key));
            }
            TransitionChoice::Invalid(input) => {
                self.finish_transition(format!(
                    "No transition `{}` available for {}",
                    input, issue_key
                ));
            }
            TransitionChoice::Chosen(transition) => {
                let status = format!("Moving {} to {}...", issue_key, transition.name);
                self.action = Some(AppAction::ApplyTransition {
                    issue_key,
                    transition,
                });
                self.finish_transition(status);
            }
        }
    }

    pub(super) fn finish_transition(&mut self, status: String) {
        self.transition = None;
        self.status = status;
        self.apply(ModeInput::TransitionFinished);
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
