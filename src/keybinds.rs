use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    ToggleHelp,
    Refresh,
    ReloadConfig,
    NextQuery,
    PreviousQuery,
    Transition,
    AssignToSelf,
    OpenPermalink,
    MoveDown,
    MoveUp,
    JumpTop,
    JumpBottom,
    ResetView,
}

pub struct BindingSpec {
    pub command: Command,
    pub action: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

pub const BINDING_SPECS: &[BindingSpec] = &[
    BindingSpec { command: Command::Quit, action: "quit", default: "q", description: "Quit" },
    BindingSpec {
        command: Command::ToggleHelp,
        action: "help",
        default: "?",
        description: "Toggle this help",
    },
    BindingSpec {
        command: Command::Refresh,
        action: "refresh",
        default: "r",
        description: "Refresh the active query now",
    },
    BindingSpec {
        command: Command::ReloadConfig,
        action: "reload_config",
        default: "shift+r",
        description: "Reload the config file",
    },
    BindingSpec {
        command: Command::NextQuery,
        action: "next_query",
        default: "f",
        description: "Switch to the next query",
    },
    BindingSpec {
        command: Command::PreviousQuery,
        action: "previous_query",
        default: "shift+f",
        description: "Switch to the previous query",
    },
    BindingSpec {
        command: Command::Transition,
        action: "transition",
        default: "t",
        description: "Transition the selected issue",
    },
    BindingSpec {
        command: Command::AssignToSelf,
        action: "assign_to_self",
        default: "a",
        description: "Assign the selected issue to yourself",
    },
    BindingSpec {
        command: Command::OpenPermalink,
        action: "open",
        default: "o",
        description: "Open the selected issue externally",
    },
    BindingSpec {
        command: Command::MoveDown,
        action: "move_down",
        default: "j",
        description: "Next issue",
    },
    BindingSpec {
        command: Command::MoveUp,
        action: "move_up",
        default: "k",
        description: "Previous issue",
    },
    BindingSpec {
        command: Command::JumpTop,
        action: "jump_top",
        default: "g",
        description: "First issue",
    },
    BindingSpec {
        command: Command::JumpBottom,
        action: "jump_bottom",
        default: "shift+g",
        description: "Last issue",
    },
    BindingSpec {
        command: Command::ResetView,
        action: "reset_view",
        default: "esc",
        description: "Reset the view to the top",
    },
];

const FIXED_ALIASES: &[(&str, Command)] = &[
    ("down", Command::MoveDown),
    ("up", Command::MoveUp),
    ("home", Command::JumpTop),
    ("end", Command::JumpBottom),
    ("ctrl+c", Command::Quit),
];

#[derive(Debug, Clone, Default)]
pub struct Keybinds {
    commands: HashMap<String, Command>,
    labels: HashMap<Command, String>,
}

impl Keybinds {
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut commands = HashMap::new();
        let mut labels = HashMap::new();

        for (binding, command) in FIXED_ALIASES {
            if let Some(key) = normalize_binding(binding) {
                commands.insert(key, *command);
            }
        }

        let mut overridden = Vec::new();
        for spec in BINDING_SPECS {
            let override_key = overrides
                .get(spec.action)
                .and_then(|binding| normalize_binding(binding));
            match override_key {
                Some(key) => {
                    labels.insert(spec.command, key.clone());
                    overridden.push((key, spec.command));
                }
                None => {
                    let key = normalize_binding(spec.default).unwrap_or_default();
                    labels.insert(spec.command, key.clone());
                    commands.insert(key, spec.command);
                }
            }
        }
        for (key, command) in overridden {
            commands.insert(key, command);
        }

        Self { commands, labels }
    }

    pub fn command_for(&self, key: KeyEvent) -> Option<Command> {
        self.commands.get(normalize_event(key).as_str()).copied()
    }

    pub fn label(&self, command: Command) -> &str {
        self.labels.get(&command).map(String::as_str).unwrap_or("unbound")
    }

    pub fn help_rows(&self) -> Vec<(String, &'static str)> {
        BINDING_SPECS
            .iter()
            .map(|spec| (self.label(spec.command).to_string(), spec.description))
            .collect()
    }
}

pub fn parse_binding(binding: &str) -> Option<KeyEvent> {
    let tokens = binding
        .split('+')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect::<Vec<&str>>();
    if tokens.is_empty() {
        return None;
    }

    let mut modifiers = KeyModifiers::empty();
    for token in &tokens[..tokens.len().saturating_sub(1)] {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let key_token_raw = tokens[tokens.len() - 1];
    let code = match key_token_raw.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = key_token_raw.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if ch.is_ascii_uppercase() {
                modifiers |= KeyModifiers::SHIFT;
            }
            KeyCode::Char(ch.to_ascii_lowercase())
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

pub fn normalize_binding(binding: &str) -> Option<String> {
    parse_binding(binding)
        .map(normalize_event)
        .filter(|key| !key.is_empty())
}

/// Canonical text form of a key press. Letters typed with shift arrive as
/// uppercase chars on most terminals, so both shapes normalize the same way.
pub fn normalize_event(event: KeyEvent) -> String {
    let mut modifiers = event.modifiers;
    let key = match event.code {
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            if c.is_ascii_uppercase() {
                modifiers |= KeyModifiers::SHIFT;
            }
            c.to_ascii_lowercase().to_string()
        }
        KeyCode::Char(c) => {
            // Punctuation already encodes shift (`?`, `G` on some layouts).
            modifiers.remove(KeyModifiers::SHIFT);
            c.to_string()
        }
        _ => return String::new(),
    };

    let mut tokens = Vec::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        tokens.push("ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        tokens.push("alt".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        tokens.push("shift".to_string());
    }
    tokens.push(key);
    tokens.join("+")
}
