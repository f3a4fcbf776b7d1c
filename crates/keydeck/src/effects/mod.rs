//! Decorative animations. None of this feeds back into navigation: every effect
//! is a spawn-and-expire generator driven by [`EffectClock`] time, and the whole
//! layer can be switched off.

pub mod background;
pub mod orbs;
pub mod particles;
pub mod slide_animation;

use std::time::Instant;

use eframe::egui::Pos2;

use background::BackgroundShapes;
use orbs::OrbEffectSystem;
use particles::{ParticleOptions, ParticleSystem};
use slide_animation::{AnimationHint, SlideAnimation};

/// Seconds of animation time. Stands still while the window is hidden, so
/// every effect driven by it pauses too.
#[derive(Debug, Default)]
pub struct EffectClock {
    elapsed: f32,
    last: Option<Instant>,
    paused: bool,
}

impl EffectClock {
    pub fn tick(&mut self, now: Instant, visible: bool) -> f32 {
        if let Some(last) = self.last {
            if visible {
                self.elapsed += now.saturating_duration_since(last).as_secs_f32();
            }
        }
        self.last = Some(now);
        self.paused = !visible;
        self.elapsed
    }

    pub fn now(&self) -> f32 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Piecewise-linear interpolation over `(time, value)` keyframes, `t` in `[0, 1]`.
pub(crate) fn keyframes(t: f32, frames: &[(f32, f32)]) -> f32 {
    let Some(&(first_t, first_v)) = frames.first() else {
        return 0.0;
    };
    if t <= first_t {
        return first_v;
    }
    for pair in frames.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let span = (t1 - t0).max(f32::EPSILON);
            return v0 + (v1 - v0) * (t - t0) / span;
        }
    }
    frames.last().map_or(first_v, |&(_, v)| v)
}

pub struct Effects {
    enabled: bool,
    options: ParticleOptions,
    clock: EffectClock,
    particles: Option<ParticleSystem>,
    background: BackgroundShapes,
    orbs: OrbEffectSystem,
    slide: Option<SlideAnimation>,
}

impl Effects {
    pub fn new(enabled: bool, options: ParticleOptions) -> Self {
        let clock = EffectClock::default();
        let now = clock.now();
        let particles =
            (enabled && options.count > 0).then(|| ParticleSystem::new(options.clone(), now));
        Self {
            enabled,
            options,
            clock,
            particles,
            background: BackgroundShapes::new(now),
            orbs: OrbEffectSystem::default(),
            slide: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch the whole layer on or off. Turning it off drops every live object.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            let now = self.clock.now();
            self.particles = (self.options.count > 0)
                .then(|| ParticleSystem::new(self.options.clone(), now));
            self.background = BackgroundShapes::new(now);
        } else {
            if let Some(particles) = &mut self.particles {
                particles.destroy();
            }
            self.particles = None;
            self.orbs = OrbEffectSystem::default();
            self.slide = None;
        }
        log::info!("effects {}", if enabled { "on" } else { "off" });
    }

    /// Advance the clock and expire/spawn decorative objects.
    pub fn tick(&mut self, now: Instant, visible: bool) {
        let t = self.clock.tick(now, visible);
        if !self.enabled {
            return;
        }
        if let Some(particles) = &mut self.particles {
            particles.update(t);
        }
        self.background.update(t);
        self.orbs.update(t);
    }

    /// True while something on screen moves and frames should keep coming.
    pub fn is_animating(&self) -> bool {
        self.enabled && !self.clock.is_paused()
    }

    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    pub fn slide_changed(&mut self, index: usize, hint: Option<AnimationHint>) {
        if !self.enabled {
            return;
        }
        if let Some(hint) = hint {
            log::debug!("slide {} animation: {}", index + 1, hint.name());
        }
        self.slide = Some(SlideAnimation::start(index, hint, self.clock.now()));
    }

    pub fn collect_orb(&mut self, center: Pos2) {
        if self.enabled {
            log::trace!("orb collected at ({:.0}, {:.0})", center.x, center.y);
            self.orbs.create_collection_effect(center, self.clock.now());
        }
    }

    pub fn particles(&self) -> Option<&ParticleSystem> {
        self.particles.as_ref()
    }

    pub fn background(&self) -> Option<&BackgroundShapes> {
        self.enabled.then_some(&self.background)
    }

    pub fn orbs(&self) -> &OrbEffectSystem {
        &self.orbs
    }

    /// The entrance animation of `index`, if it is the one currently running.
    pub fn slide_animation(&self, index: usize) -> Option<&SlideAnimation> {
        self.slide.as_ref().filter(|a| a.slide == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_pauses_while_hidden() {
        let t0 = Instant::now();
        let mut clock = EffectClock::default();
        assert_eq!(clock.tick(t0, true), 0.0);
        let t = clock.tick(t0 + Duration::from_secs(2), true);
        assert!((t - 2.0).abs() < 1e-4);

        // Hidden for ten seconds: no time passes.
        let t = clock.tick(t0 + Duration::from_secs(12), false);
        assert!((t - 2.0).abs() < 1e-4);
        assert!(clock.is_paused());

        // Visible again: only the visible interval counts.
        let t = clock.tick(t0 + Duration::from_secs(13), true);
        assert!((t - 3.0).abs() < 1e-4);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_keyframes() {
        let frames = [(0.0, 1.0), (0.5, 2.0), (1.0, 3.0)];
        assert_eq!(keyframes(0.0, &frames), 1.0);
        assert_eq!(keyframes(0.25, &frames), 1.5);
        assert_eq!(keyframes(0.5, &frames), 2.0);
        assert_eq!(keyframes(1.0, &frames), 3.0);
        assert_eq!(keyframes(2.0, &frames), 3.0);
        assert_eq!(keyframes(0.5, &[]), 0.0);
    }

    #[test]
    fn test_disabled_effects_stay_empty() {
        let t0 = Instant::now();
        let mut effects = Effects::new(false, ParticleOptions::default());
        effects.tick(t0, true);
        effects.tick(t0 + Duration::from_secs(30), true);
        effects.collect_orb(Pos2::new(10.0, 10.0));
        effects.slide_changed(1, Some(AnimationHint::Workflow));

        assert!(effects.particles().is_none());
        assert!(effects.background().is_none());
        assert!(effects.orbs().is_empty());
        assert!(effects.slide_animation(1).is_none());
        assert!(!effects.is_animating());
    }

    #[test]
    fn test_slide_animation_tracks_latest_slide() {
        let mut effects = Effects::new(true, ParticleOptions::default());
        effects.slide_changed(0, Some(AnimationHint::TitleOrbs));
        effects.slide_changed(3, None);
        assert!(effects.slide_animation(0).is_none());
        assert!(effects.slide_animation(3).is_some());
    }

    #[test]
    fn test_toggling_off_clears_live_objects() {
        let mut effects = Effects::new(true, ParticleOptions::default());
        effects.collect_orb(Pos2::new(5.0, 5.0));
        effects.slide_changed(0, None);
        assert!(!effects.orbs().is_empty());

        effects.set_enabled(false);
        assert!(effects.particles().is_none());
        assert!(effects.orbs().is_empty());
        assert!(effects.slide_animation(0).is_none());

        effects.set_enabled(true);
        assert_eq!(effects.particles().map(ParticleSystem::len), Some(25));
    }

    #[test]
    fn test_zero_particles_skips_system() {
        let options = ParticleOptions {
            count: 0,
            ..ParticleOptions::default()
        };
        let effects = Effects::new(true, options);
        assert!(effects.particles().is_none());
        assert!(effects.background().is_some());
    }
}
