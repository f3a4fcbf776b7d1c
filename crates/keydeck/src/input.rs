use eframe::egui;

use crate::navigator::{Action, Direction};

/// Minimum horizontal travel, in points, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Navigator action bound to a key, if any.
pub fn key_action(key: egui::Key) -> Option<Action> {
    match key {
        egui::Key::ArrowLeft | egui::Key::ArrowUp => Some(Action::Step(Direction::Backward)),
        egui::Key::ArrowRight | egui::Key::ArrowDown | egui::Key::Space => {
            Some(Action::Step(Direction::Forward))
        }
        egui::Key::Home => Some(Action::First),
        egui::Key::End => Some(Action::Last),
        egui::Key::N => Some(Action::ToggleNotes),
        egui::Key::F => Some(Action::ToggleFullscreen),
        _ => None,
    }
}

/// On-screen controls that map to navigator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Notes,
}

impl Control {
    pub fn action(self) -> Action {
        match self {
            Self::Previous => Action::Step(Direction::Backward),
            Self::Next => Action::Step(Direction::Forward),
            Self::Notes => Action::ToggleNotes,
        }
    }
}

/// Swiping left (finger moves towards smaller x) advances; swiping right goes back.
pub fn swipe_action(start_x: f32, end_x: f32) -> Option<Action> {
    let diff = start_x - end_x;
    if diff.abs() <= SWIPE_THRESHOLD {
        return None;
    }
    if diff > 0.0 {
        Some(Action::Step(Direction::Forward))
    } else {
        Some(Action::Step(Direction::Backward))
    }
}

/// Pairs touch-start and touch-end positions into swipes.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    pub fn touch_end(&mut self, x: f32) -> Option<Action> {
        let start = self.start_x.take()?;
        swipe_action(start, x)
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    /// Feed one egui event; returns an action when it completes a swipe.
    pub fn handle_event(&mut self, event: &egui::Event) -> Option<Action> {
        let egui::Event::Touch { phase, pos, .. } = event else {
            return None;
        };
        match phase {
            egui::TouchPhase::Start => {
                self.touch_start(pos.x);
                None
            }
            egui::TouchPhase::End => self.touch_end(pos.x),
            egui::TouchPhase::Cancel => {
                self.cancel();
                None
            }
            egui::TouchPhase::Move => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        let back = Some(Action::Step(Direction::Backward));
        let fwd = Some(Action::Step(Direction::Forward));
        assert_eq!(key_action(egui::Key::ArrowLeft), back);
        assert_eq!(key_action(egui::Key::ArrowUp), back);
        assert_eq!(key_action(egui::Key::ArrowRight), fwd);
        assert_eq!(key_action(egui::Key::ArrowDown), fwd);
        assert_eq!(key_action(egui::Key::Space), fwd);
        assert_eq!(key_action(egui::Key::Home), Some(Action::First));
        assert_eq!(key_action(egui::Key::End), Some(Action::Last));
        assert_eq!(key_action(egui::Key::N), Some(Action::ToggleNotes));
        assert_eq!(key_action(egui::Key::F), Some(Action::ToggleFullscreen));
        assert_eq!(key_action(egui::Key::X), None);
    }

    #[test]
    fn test_swipe_threshold() {
        assert_eq!(swipe_action(200.0, 150.0), None);
        assert_eq!(swipe_action(150.0, 200.0), None);
        assert_eq!(swipe_action(200.0, 180.0), None);
        assert_eq!(
            swipe_action(200.0, 149.0),
            Some(Action::Step(Direction::Forward))
        );
        assert_eq!(
            swipe_action(100.0, 151.0),
            Some(Action::Step(Direction::Backward))
        );
    }

    #[test]
    fn test_tracker_needs_a_start() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.touch_end(0.0), None);

        tracker.touch_start(300.0);
        assert_eq!(
            tracker.touch_end(100.0),
            Some(Action::Step(Direction::Forward))
        );
        // Start is consumed by the end event.
        assert_eq!(tracker.touch_end(0.0), None);
    }

    #[test]
    fn test_tracker_cancel() {
        let mut tracker = SwipeTracker::default();
        tracker.touch_start(300.0);
        tracker.cancel();
        assert_eq!(tracker.touch_end(0.0), None);
    }

    #[test]
    fn test_controls() {
        assert_eq!(
            Control::Previous.action(),
            Action::Step(Direction::Backward)
        );
        assert_eq!(Control::Next.action(), Action::Step(Direction::Forward));
        assert_eq!(Control::Notes.action(), Action::ToggleNotes);
    }
}
