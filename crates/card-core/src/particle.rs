use crate::color::Rgb;
use crate::constants::{DRAG_PER_FRAME, REFERENCE_FPS, TRAIL_CAPACITY};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Circle,
    Star,
    Sparkle,
    Heart,
}

/// Which sub-population of an effect a particle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Population {
    Main,
    Sparkle,
    Trail,
    Confetti,
    Bloom,
}

/// Fixed-capacity history of recent positions, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: SmallVec<[Vec2; TRAIL_CAPACITY]>,
}

impl Trail {
    /// Append `p`, dropping the oldest points beyond `max_len`.
    pub fn push(&mut self, p: Vec2, max_len: usize) {
        let max_len = max_len.min(TRAIL_CAPACITY);
        if max_len == 0 {
            self.points.clear();
            return;
        }
        while self.points.len() >= max_len {
            self.points.remove(0);
        }
        self.points.push(p);
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One simulated particle. The same shape serves all three effects; fields an
/// effect does not use stay at their defaults.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub spin: f32,
    pub size: f32,
    pub color: Rgb,
    pub accent: Rgb,
    /// Remaining life in seconds.
    pub life: f32,
    pub max_life: f32,
    /// Sway phase (confetti) or bloom clock (flowers).
    pub phase: f32,
    pub phase_speed: f32,
    pub gravity_scale: f32,
    /// Seconds before a bloom starts to open.
    pub delay: f32,
    pub trail: Trail,
    pub shape: Shape,
    pub population: Population,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, color: Rgb) -> Self {
        let life = life.max(f32::EPSILON);
        Self {
            pos,
            vel,
            rotation: 0.0,
            spin: 0.0,
            size: 1.0,
            color,
            accent: color,
            life,
            max_life: life,
            phase: 0.0,
            phase_speed: 0.0,
            gravity_scale: 1.0,
            delay: 0.0,
            trail: Trail::default(),
            shape: Shape::Circle,
            population: Population::Main,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_population(mut self, population: Population) -> Self {
        self.population = population;
        self
    }

    /// 1 at birth, 0 at death.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Burn `dt` seconds of life. Life only ever goes down.
    #[inline]
    pub fn age(&mut self, dt: f32) {
        self.life -= dt.max(0.0);
    }

    /// Kill outright (e.g. left the surface).
    #[inline]
    pub fn expire(&mut self) {
        self.life = self.life.min(0.0);
    }

    /// Outside the rectangle `[-margin, w+margin] x [-margin, h+margin]`.
    #[inline]
    pub fn is_outside(&self, width: f32, height: f32, margin: f32) -> bool {
        self.pos.x < -margin
            || self.pos.x > width + margin
            || self.pos.y < -margin
            || self.pos.y > height + margin
    }
}

/// Velocity multiplier for `dt` seconds of air drag.
#[inline]
pub fn drag_factor(dt: f32) -> f32 {
    DRAG_PER_FRAME.powf(dt * REFERENCE_FPS)
}
