use eframe::egui::{self, Rect};

use crate::effects::Effects;
use crate::effects::orbs::{BURST_COLOR, OrbEffectKind, SPARKLE_COLOR};
use crate::theme::Theme;

/// Background shapes and particles, painted beneath the slide content.
pub fn paint_backdrop(ui: &egui::Ui, effects: &Effects, theme: &Theme, rect: Rect, scale: f32) {
    let painter = ui.painter();
    let now = effects.now();
    if let Some(background) = effects.background() {
        for (i, shape) in background.shapes().iter().enumerate() {
            let sample = shape.sample(now, rect, scale);
            let color = if i % 2 == 0 {
                theme.accent
            } else {
                theme.secondary_accent
            };
            painter.circle_filled(
                sample.center,
                sample.radius,
                Theme::with_opacity(color, sample.opacity),
            );
        }
    }
    if let Some(particles) = effects.particles() {
        for sample in particles.samples(now, rect) {
            painter.circle_filled(sample.pos, sample.radius * scale.max(0.5), sample.color);
        }
    }
}

/// Collection bursts and sparkles, painted above everything else.
pub fn paint_orb_effects(ui: &egui::Ui, effects: &Effects, scale: f32) {
    let painter = ui.painter();
    let now = effects.now();
    for effect in effects.orbs().effects() {
        let Some(sample) = effect.sample(now) else {
            continue;
        };
        match effect.kind {
            OrbEffectKind::Burst => {
                painter.circle_stroke(
                    sample.pos,
                    sample.radius * scale,
                    egui::Stroke::new(3.0 * scale, Theme::with_opacity(BURST_COLOR, sample.opacity)),
                );
            }
            OrbEffectKind::Sparkle { .. } => {
                painter.circle_filled(
                    sample.pos,
                    sample.radius * scale,
                    Theme::with_opacity(SPARKLE_COLOR, sample.opacity),
                );
            }
        }
    }
}
