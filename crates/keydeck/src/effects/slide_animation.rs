use std::f32::consts::TAU;

use super::keyframes;

/// Stagger between body items entering a freshly shown slide.
pub const ITEM_STAGGER: f32 = 0.2;
/// How long one item takes to settle.
pub const ENTRANCE_DURATION: f32 = 0.6;
/// Decorative orbs drawn on slides whose hint calls for them.
pub const ORB_COUNT: usize = 3;

/// Extra animation a slide asks for with `@animation: <name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationHint {
    TitleOrbs,
    Workflow,
    Player,
    OrbCollection,
}

impl AnimationHint {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title-orbs" => Some(Self::TitleOrbs),
            "workflow" => Some(Self::Workflow),
            "player" => Some(Self::Player),
            "orb-collection" => Some(Self::OrbCollection),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TitleOrbs => "title-orbs",
            Self::Workflow => "workflow",
            Self::Player => "player",
            Self::OrbCollection => "orb-collection",
        }
    }

    pub fn has_orbs(self) -> bool {
        matches!(self, Self::TitleOrbs | Self::OrbCollection)
    }
}

/// Vertical offset, scale and opacity applied on top of an element's rest layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub offset_y: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Motion {
    pub const REST: Motion = Motion {
        offset_y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };
}

/// Looping animation phase in `[0, 1)`, or `None` before `start`.
fn loop_phase(elapsed: f32, start: f32, period: f32) -> Option<f32> {
    let t = elapsed - start;
    (t >= 0.0).then(|| (t / period).fract())
}

#[derive(Debug, Clone, Copy)]
pub struct SlideAnimation {
    pub slide: usize,
    pub hint: Option<AnimationHint>,
    started_at: f32,
}

impl SlideAnimation {
    pub fn start(slide: usize, hint: Option<AnimationHint>, now: f32) -> Self {
        Self {
            slide,
            hint,
            started_at: now,
        }
    }

    fn elapsed(&self, now: f32) -> f32 {
        now - self.started_at
    }

    /// Entrance progress of body item `index`: 0 hidden, 1 settled.
    pub fn item_entrance(&self, index: usize, now: f32) -> f32 {
        let t = self.elapsed(now) - index as f32 * ITEM_STAGGER;
        (t / ENTRANCE_DURATION).clamp(0.0, 1.0)
    }

    /// Motion of body item `index` once it has entered.
    pub fn item_motion(&self, index: usize, now: f32) -> Motion {
        let entrance = self.item_entrance(index, now);
        let eased = 1.0 - (1.0 - entrance).powi(3);
        let mut motion = Motion {
            offset_y: (1.0 - eased) * 24.0,
            scale: 1.0,
            opacity: entrance,
        };
        if self.hint == Some(AnimationHint::Workflow) {
            if let Some(p) = loop_phase(self.elapsed(now), 0.5 + index as f32 * 0.3, 2.0) {
                motion.scale = 1.0 + 0.05 * (p * TAU).sin().max(0.0);
            }
        }
        motion
    }

    /// Motion of decorative orb `index`.
    pub fn orb_motion(&self, index: usize, now: f32) -> Motion {
        let elapsed = self.elapsed(now);
        match self.hint {
            Some(AnimationHint::TitleOrbs) => {
                match loop_phase(elapsed, 1.0 + index as f32 * 0.5, 3.0) {
                    Some(p) => Motion {
                        offset_y: -10.0 * (p * TAU).sin(),
                        ..Motion::REST
                    },
                    None => Motion::REST,
                }
            }
            Some(AnimationHint::OrbCollection) => {
                match loop_phase(elapsed, index as f32 * 0.5, 2.0) {
                    Some(p) => Motion {
                        offset_y: keyframes(p, &[(0.0, 0.0), (0.5, -10.0), (1.0, -20.0)]),
                        scale: keyframes(p, &[(0.0, 1.0), (0.5, 1.2), (1.0, 0.8)]),
                        opacity: keyframes(p, &[(0.0, 1.0), (0.5, 0.8), (1.0, 0.0)]),
                    },
                    None => Motion::REST,
                }
            }
            _ => Motion::REST,
        }
    }

    /// Horizontal position of the player marker in `[0, 1]`, moving back and forth.
    pub fn player_position(&self, now: f32) -> Option<f32> {
        if self.hint != Some(AnimationHint::Player) {
            return None;
        }
        let p = loop_phase(self.elapsed(now), 1.0, 4.0).unwrap_or(0.0);
        Some(0.5 - 0.5 * (p * TAU).cos())
    }
}
