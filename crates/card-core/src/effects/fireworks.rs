//! Radial firework bursts with sparkles, slow trailing embers and streaks.

use crate::color::{Rgb, FIREWORK_PALETTE};
use crate::config::Quality;
use crate::constants::*;
use crate::particle::{drag_factor, Particle, Population, Shape};
use crate::surface::{sparkle_points, Blend, ClearMode, Surface};
use crate::system::{sample, Effect, Frame};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Sizes of the three populations created by one burst of `count`.
#[inline]
pub fn burst_split(count: usize) -> (usize, usize, usize) {
    (count, count / SPARKLE_DIVISOR, count / TRAIL_DIVISOR)
}

#[derive(Clone, Debug, Default)]
pub struct Fireworks;

impl Fireworks {
    fn random_color(rng: &mut StdRng) -> Rgb {
        FIREWORK_PALETTE[rng.gen_range(0..FIREWORK_PALETTE.len())]
    }
}

impl Effect for Fireworks {
    fn burst(
        &mut self,
        origin: Vec2,
        count: usize,
        _quality: &Quality,
        rng: &mut StdRng,
        out: &mut Vec<Particle>,
    ) {
        let (main, sparkles, trails) = burst_split(count);
        out.reserve(main + sparkles + trails);
        let base = Self::random_color(rng);

        // Even ring with a little jitter so bursts do not look stamped.
        for i in 0..main {
            let angle = TAU * i as f32 / main as f32
                + (rng.gen::<f32>() - 0.5) * FIREWORK_ANGLE_JITTER;
            let speed = sample(rng, FIREWORK_SPEED);
            let color = if rng.gen::<f32>() < FIREWORK_OFF_COLOR_CHANCE {
                Self::random_color(rng)
            } else {
                base
            };
            let life = sample(rng, FIREWORK_LIFE);
            out.push(
                Particle::new(origin, Vec2::from_angle(angle) * speed, life, color)
                    .with_size(sample(rng, FIREWORK_SIZE)),
            );
        }

        for _ in 0..sparkles {
            let angle = rng.gen::<f32>() * TAU;
            let speed = sample(rng, SPARKLE_SPEED);
            let life = sample(rng, SPARKLE_LIFE);
            let mut p = Particle::new(origin, Vec2::from_angle(angle) * speed, life, Rgb::WHITE)
                .with_size(sample(rng, SPARKLE_SIZE))
                .with_shape(Shape::Sparkle)
                .with_population(Population::Sparkle);
            p.rotation = rng.gen::<f32>() * TAU;
            out.push(p);
        }

        for _ in 0..trails {
            let angle = rng.gen::<f32>() * TAU;
            let speed = sample(rng, TRAIL_SPEED);
            let life = sample(rng, TRAIL_LIFE);
            let mut p = Particle::new(
                origin,
                Vec2::from_angle(angle) * speed,
                life,
                base.lighten(0.25),
            )
            .with_size(sample(rng, TRAIL_SIZE))
            .with_population(Population::Trail);
            p.gravity_scale = TRAIL_GRAVITY_SCALE;
            out.push(p);
        }
    }

    fn integrate(&self, p: &mut Particle, frame: &Frame<'_>) -> bool {
        let dt = frame.dt;
        p.trail.push(p.pos, frame.quality.trail_len);
        p.pos += p.vel * dt * frame.quality.speed_scale;
        p.vel.y += FIREWORK_GRAVITY * p.gravity_scale * dt;
        p.vel *= drag_factor(dt);
        p.age(dt);

        let vp = frame.viewport;
        if !vp.is_empty() && p.is_outside(vp.width, vp.height, FIREWORK_CULL_MARGIN) {
            p.expire();
        }
        p.is_alive()
    }

    fn begin_draw(&self, surface: &mut dyn Surface, _quality: &Quality) {
        surface.set_blend(Blend::Lighter);
    }

    fn draw(&self, p: &Particle, surface: &mut dyn Surface, quality: &Quality) {
        let alpha = p.life_fraction();
        let size = p.size * (0.85 + alpha * 0.25);

        if !p.trail.is_empty() {
            let mut pts: SmallVec<[Vec2; TRAIL_CAPACITY + 1]> = SmallVec::new();
            pts.extend_from_slice(p.trail.points());
            pts.push(p.pos);
            surface.save();
            surface.set_alpha(alpha * quality.trail_alpha);
            surface.stroke_polyline(&pts, (size * quality.trail_width).max(0.8), p.color);
            surface.restore();
        }

        surface.save();
        surface.set_alpha(alpha);
        if quality.glow {
            surface.set_glow(FIREWORK_GLOW_BLUR, p.color);
        }
        match p.shape {
            Shape::Sparkle => {
                surface.translate(p.pos.x, p.pos.y);
                surface.rotate(p.rotation);
                surface.fill_polygon(&sparkle_points(size.max(0.8) * 1.6), p.color);
            }
            _ => surface.fill_circle(p.pos, size.max(0.8), p.color),
        }
        surface.restore();
    }

    fn end_draw(&self, surface: &mut dyn Surface, _quality: &Quality) {
        surface.set_blend(Blend::Normal);
    }

    fn clear_mode(&self, quality: &Quality) -> ClearMode {
        ClearMode::Fade(quality.fade_alpha)
    }
}
