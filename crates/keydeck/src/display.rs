use std::fmt;
use std::time::{Duration, Instant};

/// How long the platform gets to apply a fullscreen change before we call it rejected.
const CONFIRM_WINDOW: Duration = Duration::from_millis(750);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullscreenRejected {
    pub wanted: bool,
}

impl fmt::Display for FullscreenRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wanted {
            write!(f, "the window did not enter fullscreen")
        } else {
            write!(f, "the window did not leave fullscreen")
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    wanted: bool,
    requested_at: Instant,
}

/// Tracks fire-and-forget fullscreen requests so a rejected one can be reported.
#[derive(Debug, Default)]
pub struct FullscreenMonitor {
    pending: Option<Pending>,
}

impl FullscreenMonitor {
    /// Record a toggle request; returns the mode to ask the platform for.
    pub fn request(&mut self, currently_fullscreen: bool, now: Instant) -> bool {
        let wanted = !currently_fullscreen;
        self.pending = Some(Pending {
            wanted,
            requested_at: now,
        });
        wanted
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Compare the observed mode against the outstanding request.
    pub fn observe(&mut self, fullscreen: bool, now: Instant) -> Option<FullscreenRejected> {
        let pending = self.pending?;
        if fullscreen == pending.wanted {
            self.pending = None;
            return None;
        }
        if now.duration_since(pending.requested_at) >= CONFIRM_WINDOW {
            self.pending = None;
            return Some(FullscreenRejected {
                wanted: pending.wanted,
            });
        }
        None
    }
}
