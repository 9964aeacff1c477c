//! Falling confetti emitted from above the top edge.

use crate::color::CONFETTI_PALETTE;
use crate::config::Quality;
use crate::constants::*;
use crate::particle::{drag_factor, Particle, Population, Shape};
use crate::surface::{heart_points, star_points, Surface};
use crate::system::{sample, Effect, Emission, Frame};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

const SHAPES: [Shape; 4] = [Shape::Rect, Shape::Circle, Shape::Star, Shape::Heart];

/// Emission state for one activation: a fixed budget released at a capped
/// rate over a short window.
#[derive(Clone, Debug, Default)]
pub struct Confetti {
    remaining: Option<usize>,
    rate: f32,
    carry: f32,
    next_shape: usize,
}

impl Confetti {
    fn piece(&mut self, width: f32, rng: &mut StdRng) -> Particle {
        let shape = SHAPES[self.next_shape % SHAPES.len()];
        self.next_shape = self.next_shape.wrapping_add(1);

        let pos = Vec2::new(rng.gen::<f32>() * width, sample(rng, CONFETTI_SPAWN_Y));
        let vel = Vec2::new(
            (rng.gen::<f32>() - 0.5) * CONFETTI_SPEED_X,
            sample(rng, CONFETTI_SPEED_Y),
        );
        let color = CONFETTI_PALETTE[rng.gen_range(0..CONFETTI_PALETTE.len())];
        let mut p = Particle::new(pos, vel, sample(rng, CONFETTI_LIFE), color)
            .with_size(sample(rng, CONFETTI_SIZE))
            .with_shape(shape)
            .with_population(Population::Confetti);
        p.accent = color.lighten(CONFETTI_HIGHLIGHT);
        p.rotation = rng.gen::<f32>() * TAU;
        p.spin = (rng.gen::<f32>() - 0.5) * CONFETTI_SPIN;
        p.phase = rng.gen::<f32>() * TAU;
        p.phase_speed = sample(rng, CONFETTI_SWAY_SPEED);
        p
    }
}

impl Effect for Confetti {
    /// Party-popper burst: pieces thrown upward from `origin` in a cone.
    fn burst(
        &mut self,
        origin: Vec2,
        count: usize,
        _quality: &Quality,
        rng: &mut StdRng,
        out: &mut Vec<Particle>,
    ) {
        for _ in 0..count {
            let mut p = self.piece(0.0, rng);
            let angle = -FRAC_PI_2 + (rng.gen::<f32>() - 0.5) * CONFETTI_POP_SPREAD;
            p.pos = origin;
            p.vel = Vec2::from_angle(angle) * sample(rng, CONFETTI_POP_SPEED);
            out.push(p);
        }
    }

    fn emit(
        &mut self,
        frame: &Frame<'_>,
        room: usize,
        rng: &mut StdRng,
        out: &mut Vec<Particle>,
    ) -> Emission {
        let quality = frame.quality;
        let remaining = match self.remaining {
            Some(r) => r,
            None => {
                let budget = quality.scale_count(quality.confetti_count, CONFETTI_MIN_COUNT);
                self.rate = budget as f32 / CONFETTI_EMIT_WINDOW_SEC;
                // first frame drops an initial wave
                self.carry = budget as f32 * 0.25;
                self.remaining = Some(budget);
                budget
            }
        };
        if remaining == 0 {
            return Emission::Exhausted;
        }
        // Host not laid out yet; hold the budget.
        if frame.viewport.is_empty() {
            return Emission::Continue;
        }

        self.carry = (self.carry + self.rate * frame.dt).min(remaining as f32);
        let n = (self.carry.floor() as usize).min(room).min(remaining);
        for _ in 0..n {
            out.push(self.piece(frame.viewport.width, rng));
        }
        self.carry -= n as f32;
        let left = remaining - n;
        self.remaining = Some(left);
        if left == 0 {
            Emission::Exhausted
        } else {
            Emission::Continue
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn integrate(&self, p: &mut Particle, frame: &Frame<'_>) -> bool {
        let dt = frame.dt;
        p.phase += p.phase_speed * dt;
        let sway = p.phase.sin() * frame.quality.confetti_sway;
        p.pos.x += (p.vel.x + sway) * dt;
        p.pos.y += p.vel.y * dt;
        p.rotation += p.spin * dt;
        p.vel.y += CONFETTI_GRAVITY * dt;
        p.vel *= drag_factor(dt);
        p.age(dt);

        let vp = frame.viewport;
        if !vp.is_empty() && p.pos.y > vp.height + CONFETTI_CULL_MARGIN {
            p.expire();
        }
        p.is_alive()
    }

    fn draw(&self, p: &Particle, surface: &mut dyn Surface, _quality: &Quality) {
        let life = p.life_fraction();
        // ease-out fade
        let alpha = life * life;
        let s = p.size;

        surface.save();
        surface.set_alpha(alpha);
        surface.translate(p.pos.x, p.pos.y);
        surface.rotate(p.rotation);
        match p.shape {
            Shape::Rect => {
                surface.fill_rect(-s / 2.0, -s / 4.0, s, s / 2.0, p.color);
                surface.set_alpha(alpha * 0.5);
                surface.fill_rect(-s / 2.0, -s / 4.0, s, s / 6.0, p.accent);
            }
            Shape::Circle => {
                surface.fill_circle(Vec2::ZERO, s / 2.0, p.color);
                surface.set_alpha(alpha * 0.5);
                surface.fill_circle(Vec2::splat(-s * 0.12), s * 0.18, p.accent);
            }
            Shape::Star | Shape::Sparkle => {
                surface.fill_polygon(&star_points(s / 2.0, s / 4.0), p.color);
            }
            Shape::Heart => {
                surface.fill_polygon(&heart_points(s), p.color);
            }
        }
        surface.restore();
    }
}
