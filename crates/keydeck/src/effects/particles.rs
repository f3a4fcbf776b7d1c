use eframe::egui::{Color32, Pos2, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Lower bound on the spawn interval so a bad config can't spin the spawner.
const MIN_SPAWN_RATE: f32 = 0.05;
/// Fraction of the flight spent fading in and out.
const FADE_FRACTION: f32 = 0.1;
/// Maximum horizontal drift either side of the start position, in points.
const MAX_DRIFT: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
    /// Particles created up front, staggered across one flight.
    pub count: usize,
    /// Diameter in points.
    pub size: f32,
    /// RGBA, unmultiplied.
    pub color: [u8; 4],
    /// Seconds for one particle to float from the bottom to the top.
    pub duration: f32,
    /// Seconds between spawns after the initial batch.
    pub spawn_rate: f32,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 25,
            size: 4.0,
            color: [0, 245, 255, 153],
            duration: 15.0,
            spawn_rate: 2.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    /// Horizontal start, percent of the container width.
    start_x: f32,
    /// Horizontal travel over the whole flight, in points.
    drift: f32,
    spawned_at: f32,
    delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    pub pos: Pos2,
    pub radius: f32,
    pub color: Color32,
}

impl Particle {
    pub fn expires_at(&self, duration: f32) -> f32 {
        self.spawned_at + self.delay + duration
    }

    /// Position within the flight, `None` before the delay has passed or after landing.
    pub fn progress(&self, now: f32, duration: f32) -> Option<f32> {
        let t = (now - self.spawned_at - self.delay) / duration.max(f32::EPSILON);
        (0.0..1.0).contains(&t).then_some(t)
    }

    pub fn sample(&self, now: f32, options: &ParticleOptions, area: Rect) -> Option<ParticleSample> {
        let t = self.progress(now, options.duration)?;
        let x = area.left() + area.width() * self.start_x / 100.0 + self.drift * t;
        let y = area.bottom() - area.height() * t;
        let opacity = (t / FADE_FRACTION).min((1.0 - t) / FADE_FRACTION).min(1.0);
        let [r, g, b, a] = options.color;
        Some(ParticleSample {
            pos: Pos2::new(x, y),
            radius: options.size / 2.0,
            color: Color32::from_rgba_unmultiplied(r, g, b, (a as f32 * opacity) as u8),
        })
    }
}

/// Ambient particles floating up the screen.
pub struct ParticleSystem {
    options: ParticleOptions,
    particles: Vec<Particle>,
    next_spawn: f32,
    rng: StdRng,
    running: bool,
}

impl ParticleSystem {
    pub fn new(options: ParticleOptions, now: f32) -> Self {
        Self::with_rng(options, now, StdRng::from_rng(&mut rand::rng()))
    }

    #[cfg(test)]
    pub fn seeded(options: ParticleOptions, now: f32, seed: u64) -> Self {
        Self::with_rng(options, now, StdRng::seed_from_u64(seed))
    }

    fn with_rng(options: ParticleOptions, now: f32, rng: StdRng) -> Self {
        let count = options.count;
        let stagger = if count > 0 {
            options.duration / count as f32
        } else {
            0.0
        };
        let mut system = Self {
            next_spawn: now + options.spawn_rate.max(MIN_SPAWN_RATE),
            particles: Vec::with_capacity(count),
            options,
            rng,
            running: true,
        };
        for i in 0..count {
            system.spawn(now, i as f32 * stagger);
        }
        system
    }

    fn spawn(&mut self, at: f32, delay: f32) {
        let start_x: f32 = self.rng.random_range(0.0..100.0);
        let drift = (self.rng.random::<f32>() - 0.5) * 2.0 * MAX_DRIFT;
        self.particles.push(Particle {
            start_x,
            drift,
            spawned_at: at,
            delay,
        });
    }

    pub fn update(&mut self, now: f32) {
        if self.running {
            let rate = self.options.spawn_rate.max(MIN_SPAWN_RATE);
            while self.next_spawn <= now {
                let at = self.next_spawn;
                self.spawn(at, 0.0);
                self.next_spawn += rate;
            }
        }
        let duration = self.options.duration;
        self.particles.retain(|p| p.expires_at(duration) > now);
    }

    /// Stop spawning and drop every live particle.
    pub fn destroy(&mut self) {
        self.running = false;
        self.particles.clear();
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn samples(&self, now: f32, area: Rect) -> impl Iterator<Item = ParticleSample> + '_ {
        self.particles
            .iter()
            .filter_map(move |p| p.sample(now, &self.options, area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn area() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(1000.0, 800.0))
    }

    #[test]
    fn test_initial_batch_is_staggered() {
        let system = ParticleSystem::seeded(ParticleOptions::default(), 0.0, 1);
        assert_eq!(system.len(), 25);
        let delays: Vec<f32> = system.particles.iter().map(|p| p.delay).collect();
        assert_eq!(delays[0], 0.0);
        assert!((delays[1] - 0.6).abs() < 1e-5);
        assert!((delays[24] - 14.4).abs() < 1e-4);
    }

    #[test]
    fn test_spawns_on_interval() {
        let options = ParticleOptions {
            count: 0,
            ..ParticleOptions::default()
        };
        let mut system = ParticleSystem::seeded(options, 0.0, 2);
        system.update(2.4);
        assert!(system.is_empty());
        system.update(2.5);
        assert_eq!(system.len(), 1);
        system.update(7.6);
        assert_eq!(system.len(), 3);
    }

    #[test]
    fn test_particle_removed_after_duration_plus_delay() {
        let options = ParticleOptions {
            count: 2,
            spawn_rate: 1000.0,
            ..ParticleOptions::default()
        };
        // Delays: 0 and 7.5.
        let mut system = ParticleSystem::seeded(options, 0.0, 3);
        system.update(14.9);
        assert_eq!(system.len(), 2);
        system.update(15.1);
        assert_eq!(system.len(), 1);
        system.update(22.6);
        assert!(system.is_empty());
    }

    #[test]
    fn test_destroy_stops_spawning() {
        let mut system = ParticleSystem::seeded(ParticleOptions::default(), 0.0, 4);
        system.destroy();
        assert!(system.is_empty());
        assert!(!system.is_running());
        system.update(100.0);
        assert!(system.is_empty());
    }

    #[test]
    fn test_samples_stay_in_flight_window() {
        let options = ParticleOptions::default();
        let system = ParticleSystem::seeded(options.clone(), 0.0, 5);
        // At t=0 only the undelayed particle has started.
        assert_eq!(system.samples(0.0, area()).count(), 1);

        let particle = &system.particles[0];
        let mid = particle.sample(7.5, &options, area()).unwrap();
        assert!((mid.pos.y - 400.0).abs() < 1e-3);
        let start_x = particle.start_x * 10.0;
        assert!((mid.pos.x - start_x).abs() <= MAX_DRIFT / 2.0 + 1e-3);
        assert_eq!(mid.radius, 2.0);
        assert_eq!(mid.color.a(), 153);

        assert!(particle.sample(15.0, &options, area()).is_none());
        assert!(particle.sample(-1.0, &options, area()).is_none());
    }

    #[test]
    fn test_sample_fades_at_edges() {
        let options = ParticleOptions::default();
        let system = ParticleSystem::seeded(options.clone(), 0.0, 6);
        let particle = &system.particles[0];
        let early = particle.sample(0.1, &options, area()).unwrap();
        assert!(early.color.a() < 153);
        let late = particle.sample(14.9, &options, area()).unwrap();
        assert!(late.color.a() < 153);
    }
}
