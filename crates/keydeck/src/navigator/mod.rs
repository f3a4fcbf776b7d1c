//! Slide navigation state machine.
//!
//! [`NavState`] is a plain value. Every change goes through [`NavState::dispatch`],
//! which returns the next state plus at most one [`Command`] for the UI layer to
//! carry out. Nothing here touches the window, so the whole machine is testable
//! without a rendering environment.

pub mod auto_advance;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move one slide in the given direction, ignored at the deck boundaries.
    Step(Direction),
    /// Jump to a 0-indexed slide, ignored when out of range.
    GoTo(usize),
    First,
    Last,
    ToggleNotes,
    ToggleFullscreen,
}

/// Side effects requested by a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The visible slide changed; its entrance animation should start.
    SlideChanged(usize),
    /// Enter or leave fullscreen, whichever is the opposite of the current mode.
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    current: usize,
    total: usize,
    show_notes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: NavState,
    pub command: Option<Command>,
}

impl NavState {
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total,
            show_notes: false,
        }
    }

    /// Start on `index`, clamped into the deck.
    pub fn starting_at(total: usize, index: usize) -> Self {
        Self {
            current: index.min(total.saturating_sub(1)),
            ..Self::new(total)
        }
    }

    /// The current slide, or `None` for an empty deck.
    pub fn current(&self) -> Option<usize> {
        (self.total > 0).then_some(self.current)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn show_notes(&self) -> bool {
        self.show_notes
    }

    pub fn is_first(&self) -> bool {
        self.total > 0 && self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.total > 0 && self.current == self.total - 1
    }

    pub fn dispatch(self, action: Action) -> Transition {
        match action {
            Action::Step(direction) => {
                let candidate = match direction {
                    Direction::Backward => self.current.checked_sub(1),
                    Direction::Forward => self.current.checked_add(1),
                };
                match candidate {
                    Some(index) => self.go_to(index),
                    None => self.unchanged(),
                }
            }
            Action::GoTo(index) => self.go_to(index),
            Action::First => self.go_to(0),
            Action::Last => match self.total.checked_sub(1) {
                Some(index) => self.go_to(index),
                None => self.unchanged(),
            },
            Action::ToggleNotes => Transition {
                state: Self {
                    show_notes: !self.show_notes,
                    ..self
                },
                command: None,
            },
            Action::ToggleFullscreen => Transition {
                state: self,
                command: Some(Command::ToggleFullscreen),
            },
        }
    }

    fn go_to(self, index: usize) -> Transition {
        if index >= self.total {
            return self.unchanged();
        }
        Transition {
            state: Self {
                current: index,
                ..self
            },
            command: Some(Command::SlideChanged(index)),
        }
    }

    fn unchanged(self) -> Transition {
        Transition {
            state: self,
            command: None,
        }
    }
}
