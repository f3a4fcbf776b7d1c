use super::NavState;

/// Everything the chrome needs to draw for one navigator state.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub active: Option<usize>,
    pub total: usize,
    pub counter: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub show_notes: bool,
}

impl SlideView {
    pub fn from_state(state: &NavState) -> Self {
        let active = state.current();
        let total = state.total();
        let shown = active.map_or(0, |i| i + 1);
        Self {
            active,
            total,
            counter: format!("{shown} / {total}"),
            prev_enabled: active.is_some() && !state.is_first(),
            next_enabled: active.is_some() && !state.is_last(),
            show_notes: state.show_notes(),
        }
    }

    #[cfg(test)]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Active flag for every slide in the deck.
    #[cfg(test)]
    pub fn active_flags(&self) -> Vec<bool> {
        (0..self.total).map(|i| self.is_active(i)).collect()
    }

    /// Fraction of the deck reached, in `[0, 1]`. An empty deck reports 0.
    pub fn progress(&self) -> f64 {
        match self.active {
            Some(i) if self.total > 0 => (i + 1) as f64 / self.total as f64,
            _ => 0.0,
        }
    }

    #[cfg(test)]
    pub fn progress_percent(&self) -> f64 {
        match self.active {
            Some(i) if self.total > 0 => (i + 1) as f64 * 100.0 / self.total as f64,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::{Action, Direction};

    #[test]
    fn test_progress_fraction() {
        let view = SlideView::from_state(&NavState::starting_at(5, 2));
        assert_eq!(view.progress(), 0.6);
        assert_eq!(view.progress_percent(), 60.0);
    }

    #[test]
    fn test_progress_empty_deck() {
        let view = SlideView::from_state(&NavState::new(0));
        assert_eq!(view.progress(), 0.0);
        assert_eq!(view.progress_percent(), 0.0);
        assert_eq!(view.counter, "0 / 0");
        assert!(!view.prev_enabled);
        assert!(!view.next_enabled);
        assert!(view.active_flags().is_empty());
    }

    #[test]
    fn test_counter_text() {
        assert_eq!(
            SlideView::from_state(&NavState::starting_at(10, 0)).counter,
            "1 / 10"
        );
        assert_eq!(
            SlideView::from_state(&NavState::starting_at(10, 9)).counter,
            "10 / 10"
        );
    }

    #[test]
    fn test_exactly_one_active_slide() {
        let mut state = NavState::new(6);
        for action in [
            Action::Step(Direction::Forward),
            Action::GoTo(4),
            Action::Step(Direction::Backward),
            Action::Last,
        ] {
            state = state.dispatch(action).state;
            let view = SlideView::from_state(&state);
            let flags = view.active_flags();
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
            assert!(flags[state.current().unwrap()]);
        }
    }

    #[test]
    fn test_single_slide_disables_both_controls() {
        let view = SlideView::from_state(&NavState::new(1));
        assert!(!view.prev_enabled);
        assert!(!view.next_enabled);
        assert_eq!(view.progress_percent(), 100.0);
    }

    #[test]
    fn test_three_slide_walkthrough() {
        let step = Action::Step(Direction::Forward);
        let state = NavState::new(3);
        let view = SlideView::from_state(&state);
        assert!(!view.prev_enabled);
        assert!(view.next_enabled);

        let state = state.dispatch(step).state;
        let view = SlideView::from_state(&state);
        assert_eq!(view.active, Some(1));
        assert!(view.prev_enabled);
        assert!(view.next_enabled);

        let state = state.dispatch(step).state;
        let view = SlideView::from_state(&state);
        assert_eq!(view.active, Some(2));
        assert!(view.prev_enabled);
        assert!(!view.next_enabled);

        let t = state.dispatch(step);
        assert_eq!(t.state.current(), Some(2));
        assert_eq!(t.command, None);
    }
}
