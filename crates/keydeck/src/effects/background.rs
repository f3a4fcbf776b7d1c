use std::f32::consts::TAU;
use std::ops::Range;

use eframe::egui::{Pos2, Rect, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INITIAL_DURATION: f32 = 20.0;
const DURATION_RANGE: Range<f32> = 15.0..25.0;
const DRIFT: f32 = 30.0;

/// Where a shape sits, as fractions of the slide area measured from the named edges.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    TopLeft { top: f32, left: f32 },
    TopRight { top: f32, right: f32 },
    BottomLeft { bottom: f32, left: f32 },
}

#[derive(Debug, Clone, Copy)]
struct ShapeSpec {
    size: f32,
    anchor: Anchor,
    /// Negative start offset in seconds, so shapes begin out of step.
    phase: f32,
}

const SHAPES: [ShapeSpec; 5] = [
    ShapeSpec {
        size: 200.0,
        anchor: Anchor::TopLeft {
            top: 0.10,
            left: 0.10,
        },
        phase: 0.0,
    },
    ShapeSpec {
        size: 150.0,
        anchor: Anchor::TopRight {
            top: 0.70,
            right: 0.15,
        },
        phase: -5.0,
    },
    ShapeSpec {
        size: 100.0,
        anchor: Anchor::TopRight {
            top: 0.30,
            right: 0.30,
        },
        phase: -10.0,
    },
    ShapeSpec {
        size: 120.0,
        anchor: Anchor::BottomLeft {
            bottom: 0.20,
            left: 0.20,
        },
        phase: -7.5,
    },
    ShapeSpec {
        size: 80.0,
        anchor: Anchor::TopLeft {
            top: 0.50,
            left: 0.50,
        },
        phase: -12.5,
    },
];

#[derive(Debug, Clone)]
pub struct BackgroundShape {
    spec: ShapeSpec,
    duration: f32,
    cycle_start: f32,
    iterations: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSample {
    pub center: Pos2,
    pub radius: f32,
    pub opacity: f32,
}

impl BackgroundShape {
    #[cfg(test)]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[cfg(test)]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Position within the current loop, in `[0, 1)`.
    pub fn progress(&self, now: f32) -> f32 {
        ((now - self.cycle_start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f32, area: Rect, scale: f32) -> ShapeSample {
        let size = self.spec.size * scale;
        let min = match self.spec.anchor {
            Anchor::TopLeft { top, left } => Pos2::new(
                area.left() + area.width() * left,
                area.top() + area.height() * top,
            ),
            Anchor::TopRight { top, right } => Pos2::new(
                area.right() - area.width() * right - size,
                area.top() + area.height() * top,
            ),
            Anchor::BottomLeft { bottom, left } => Pos2::new(
                area.left() + area.width() * left,
                area.bottom() - area.height() * bottom - size,
            ),
        };
        let angle = self.progress(now) * TAU;
        let offset = vec2(angle.sin(), -(angle * 2.0).sin() * 0.5) * DRIFT * scale;
        ShapeSample {
            center: min + vec2(size, size) / 2.0 + offset,
            radius: size / 2.0 * (1.0 + 0.1 * angle.sin()),
            opacity: 0.06 + 0.04 * (0.5 - 0.5 * angle.cos()),
        }
    }
}

/// Slow looping shapes behind the slides. Each loop picks a fresh duration so
/// the motion never lines up.
pub struct BackgroundShapes {
    shapes: Vec<BackgroundShape>,
    rng: StdRng,
}

impl BackgroundShapes {
    pub fn new(now: f32) -> Self {
        Self::with_rng(now, StdRng::from_rng(&mut rand::rng()))
    }

    #[cfg(test)]
    pub fn seeded(now: f32, seed: u64) -> Self {
        Self::with_rng(now, StdRng::seed_from_u64(seed))
    }

    fn with_rng(now: f32, rng: StdRng) -> Self {
        let shapes = SHAPES
            .iter()
            .map(|&spec| BackgroundShape {
                spec,
                duration: INITIAL_DURATION,
                cycle_start: now + spec.phase,
                iterations: 0,
            })
            .collect();
        Self { shapes, rng }
    }

    pub fn update(&mut self, now: f32) {
        let rng = &mut self.rng;
        for (i, shape) in self.shapes.iter_mut().enumerate() {
            while now - shape.cycle_start >= shape.duration {
                shape.cycle_start += shape.duration;
                shape.duration = rng.random_range(DURATION_RANGE);
                shape.iterations += 1;
                log::trace!(
                    "shape {i} loop {} lasts {:.1}s",
                    shape.iterations,
                    shape.duration
                );
            }
        }
    }

    pub fn shapes(&self) -> &[BackgroundShape] {
        &self.shapes
    }
}
