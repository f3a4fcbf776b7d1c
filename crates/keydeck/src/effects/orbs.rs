use std::f32::consts::TAU;

use eframe::egui::{Color32, Pos2, Vec2};

use super::keyframes;

pub const SPARKLE_COUNT: usize = 8;
const SPARKLE_DISTANCE: f32 = 50.0;
const SPARKLE_DURATION: f32 = 0.8;
const SPARKLE_STAGGER: f32 = 0.1;
const SPARKLE_SIZE: f32 = 4.0;
const BURST_DURATION: f32 = 1.0;
const BURST_SIZE: f32 = 20.0;

pub const BURST_COLOR: Color32 = Color32::from_rgb(0x00, 0xF5, 0xFF);
pub const SPARKLE_COLOR: Color32 = Color32::from_rgb(0xFF, 0xFF, 0x00);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbEffectKind {
    /// Expanding glow at the collection point.
    Burst,
    /// Spark flying out towards `target`.
    Sparkle { target: Pos2 },
}

#[derive(Debug, Clone, Copy)]
pub struct OrbEffect {
    pub kind: OrbEffectKind,
    pub center: Pos2,
    spawned_at: f32,
    delay: f32,
    lifetime: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSample {
    pub pos: Pos2,
    pub radius: f32,
    pub opacity: f32,
}

impl OrbEffect {
    pub fn expires_at(&self) -> f32 {
        self.spawned_at + self.lifetime
    }

    pub fn sample(&self, now: f32) -> Option<EffectSample> {
        let age = now - self.spawned_at;
        if age < 0.0 || now >= self.expires_at() {
            return None;
        }
        match self.kind {
            OrbEffectKind::Burst => {
                let t = (age / BURST_DURATION).min(1.0);
                let scale = keyframes(t, &[(0.0, 1.0), (0.5, 2.0), (1.0, 3.0)]);
                let opacity = keyframes(t, &[(0.0, 1.0), (0.5, 0.8), (1.0, 0.0)]);
                Some(EffectSample {
                    pos: self.center,
                    radius: BURST_SIZE / 2.0 * scale,
                    opacity,
                })
            }
            OrbEffectKind::Sparkle { target } => {
                let t = ((age - self.delay) / SPARKLE_DURATION).clamp(0.0, 1.0);
                Some(EffectSample {
                    pos: self.center + (target - self.center) * t,
                    radius: SPARKLE_SIZE / 2.0 * (1.0 - t),
                    opacity: 1.0 - t,
                })
            }
        }
    }
}

/// Short-lived bursts spawned when a decorative orb is clicked.
#[derive(Debug, Default)]
pub struct OrbEffectSystem {
    effects: Vec<OrbEffect>,
}

impl OrbEffectSystem {
    pub fn create_collection_effect(&mut self, center: Pos2, now: f32) {
        self.effects.push(OrbEffect {
            kind: OrbEffectKind::Burst,
            center,
            spawned_at: now,
            delay: 0.0,
            lifetime: BURST_DURATION,
        });
        for i in 0..SPARKLE_COUNT {
            let angle = i as f32 / SPARKLE_COUNT as f32 * TAU;
            let target = center + Vec2::angled(angle) * SPARKLE_DISTANCE;
            let delay = i as f32 * SPARKLE_STAGGER;
            self.effects.push(OrbEffect {
                kind: OrbEffectKind::Sparkle { target },
                center,
                spawned_at: now,
                delay,
                lifetime: SPARKLE_DURATION + delay,
            });
        }
    }

    pub fn update(&mut self, now: f32) {
        self.effects.retain(|e| e.expires_at() > now);
    }

    pub fn effects(&self) -> &[OrbEffect] {
        &self.effects
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
