/// Mode that `Help` returns to when it is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Overview,
    Error,
}

impl Resume {
    fn mode(self) -> Mode {
        match self {
            Self::Overview => Mode::Overview,
            Self::Error => Mode::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Overview,
    Help { previous: Resume },
    Transition,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeInput {
    ToggleHelp,
    ForceRefresh,
    BeginTransition,
    TransitionFinished,
    FetchSucceeded,
    FetchFailed,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Help { .. } => "help",
            Self::Transition => "transition",
            Self::Error => "error",
        }
    }

    /// Whether the refresh timer may start fetches in this mode. Help keeps
    /// the timer of the mode underneath it running.
    pub fn polls(self) -> bool {
        match self {
            Self::Overview | Self::Error => true,
            Self::Help { previous } => previous.mode().polls(),
            Self::Transition => false,
        }
    }

    pub fn next(self, input: ModeInput) -> Mode {
        use ModeInput::*;

        match (self, input) {
            (Self::Overview, ToggleHelp) => Self::Help {
                previous: Resume::Overview,
            },
            (Self::Overview, BeginTransition) => Self::Transition,
            (Self::Overview, FetchFailed) => Self::Error,
            (Self::Overview, ForceRefresh | TransitionFinished | FetchSucceeded) => Self::Overview,

            (Self::Help { previous }, ToggleHelp) => previous.mode(),
            (Self::Help { .. }, FetchSucceeded) => Self::Help {
                previous: Resume::Overview,
            },
            (Self::Help { .. }, FetchFailed) => Self::Help {
                previous: Resume::Error,
            },
            (help @ Self::Help { .. }, ForceRefresh | BeginTransition | TransitionFinished) => help,

            (Self::Transition, TransitionFinished) => Self::Overview,
            (
                Self::Transition,
                ToggleHelp | ForceRefresh | BeginTransition | FetchSucceeded | FetchFailed,
            ) => Self::Transition,

            (Self::Error, ToggleHelp) => Self::Help {
                previous: Resume::Error,
            },
            (Self::Error, ForceRefresh | FetchSucceeded) => Self::Overview,
            (Self::Error, BeginTransition | TransitionFinished | FetchFailed) => Self::Error,
        }
    }
}
