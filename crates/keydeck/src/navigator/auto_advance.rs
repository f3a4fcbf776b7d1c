use std::time::{Duration, Instant};

use super::{Action, Direction, NavState};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Timer {
    interval: Duration,
    next_tick: Instant,
}

/// Periodic "next slide" timer. At most one timer is armed at a time.
#[derive(Debug, Default)]
pub struct AutoAdvance {
    timer: Option<Timer>,
}

impl AutoAdvance {
    /// Arm the timer, replacing any timer already running.
    /// A zero interval stops auto-advance instead.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        if interval.is_zero() {
            self.stop();
            return;
        }
        self.timer = Some(Timer {
            interval,
            next_tick: now + interval,
        });
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.timer.map(|t| t.interval)
    }

    /// When the next tick is due, for scheduling a repaint.
    pub fn next_due(&self) -> Option<Instant> {
        self.timer.map(|t| t.next_tick)
    }

    /// Fire at most one tick. A tick that finds the deck on its last slide
    /// (or empty) cancels the timer instead of advancing.
    pub fn poll(&mut self, now: Instant, state: &NavState) -> Option<Action> {
        let timer = self.timer.as_mut()?;
        if now < timer.next_tick {
            return None;
        }
        if state.current().is_none() || state.is_last() {
            log::debug!("auto-advance reached the last slide, stopping");
            self.timer = None;
            return None;
        }
        timer.next_tick += timer.interval;
        if timer.next_tick <= now {
            // Fell behind (e.g. the frame loop was suspended); don't burst.
            timer.next_tick = now + timer.interval;
        }
        Some(Action::Step(Direction::Forward))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_ticks_once_per_interval() {
        let t0 = Instant::now();
        let state = NavState::new(5);
        let mut auto = AutoAdvance::default();
        auto.start(SEC * 10, t0);

        assert_eq!(auto.poll(t0 + SEC * 9, &state), None);
        assert_eq!(
            auto.poll(t0 + SEC * 10, &state),
            Some(Action::Step(Direction::Forward))
        );
        assert_eq!(auto.poll(t0 + SEC * 11, &state), None);
        assert_eq!(auto.next_due(), Some(t0 + SEC * 20));
    }

    #[test]
    fn test_cancels_itself_on_last_slide() {
        let t0 = Instant::now();
        let mut state = NavState::new(3);
        let mut auto = AutoAdvance::default();
        auto.start(SEC, t0);

        let mut now = t0;
        let mut advanced = 0;
        for _ in 0..10 {
            now += SEC;
            if let Some(action) = auto.poll(now, &state) {
                state = state.dispatch(action).state;
                advanced += 1;
            }
        }
        assert_eq!(advanced, 2);
        assert!(state.is_last());
        assert!(!auto.is_running());
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let t0 = Instant::now();
        let state = NavState::new(5);
        let mut auto = AutoAdvance::default();
        auto.start(SEC, t0);
        auto.stop();
        for i in 1..5 {
            assert_eq!(auto.poll(t0 + SEC * i, &state), None);
        }
    }

    #[test]
    fn test_restart_replaces_prior_timer() {
        let t0 = Instant::now();
        let state = NavState::new(5);
        let mut auto = AutoAdvance::default();
        auto.start(SEC, t0);
        auto.start(SEC * 5, t0);
        assert_eq!(auto.interval(), Some(SEC * 5));
        assert_eq!(auto.poll(t0 + SEC * 2, &state), None);
        assert!(auto.poll(t0 + SEC * 5, &state).is_some());
    }

    #[test]
    fn test_zero_interval_stops() {
        let t0 = Instant::now();
        let mut auto = AutoAdvance::default();
        auto.start(SEC, t0);
        auto.start(Duration::ZERO, t0);
        assert!(!auto.is_running());
    }

    #[test]
    fn test_no_burst_after_long_pause() {
        let t0 = Instant::now();
        let state = NavState::new(10);
        let mut auto = AutoAdvance::default();
        auto.start(SEC, t0);
        assert!(auto.poll(t0 + SEC * 30, &state).is_some());
        assert_eq!(auto.poll(t0 + SEC * 30, &state), None);
        assert_eq!(auto.next_due(), Some(t0 + SEC * 31));
    }

    #[test]
    fn test_empty_deck_stops_on_first_tick() {
        let t0 = Instant::now();
        let mut auto = AutoAdvance::default();
        auto.start(SEC, t0);
        assert_eq!(auto.poll(t0 + SEC, &NavState::new(0)), None);
        assert!(!auto.is_running());
    }
}
