//! Corner flowers that pop open with an elastic scale and then sway.
//!
//! Flowers never move or die; the effect is a timed presentation that
//! freezes on its final frame after a hard stop.

use crate::color::{Rgb, FLOWER_PALETTE};
use crate::config::{BloomLayout, Quality};
use crate::constants::*;
use crate::particle::{Particle, Population};
use crate::surface::Surface;
use crate::system::{Effect, Emission, Frame};
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Elastic ease-out on `t` in 0..1, clamped to 0..1.
pub fn elastic_out(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let v = 2f32.powf(-10.0 * t) * ((t - 0.075) * TAU / 0.3).sin() + 1.0;
    v.clamp(0.0, 1.0)
}

/// Scale of a flower `since` seconds after its own delay elapsed.
pub fn bloom_scale(since: f32, delay: f32) -> f32 {
    if since < 0.0 {
        0.0
    } else if since < BLOOM_REVEAL_SEC {
        elastic_out(since / BLOOM_REVEAL_SEC)
    } else {
        let sway_t = since - BLOOM_REVEAL_SEC;
        1.0 + (sway_t * 2.0 + delay * 5.0).sin() * BLOOM_SWAY_AMPLITUDE
    }
}

fn flower(pos: Vec2, size: f32, colors: (Rgb, Rgb), delay: f32, rng: &mut StdRng) -> Particle {
    let mut p = Particle::new(pos, Vec2::ZERO, 1.0, colors.0)
        .with_size(size)
        .with_population(Population::Bloom);
    p.accent = colors.1;
    p.rotation = rng.gen::<f32>() * TAU;
    p.delay = delay;
    p
}

/// Flowers for the four corners of `viewport`.
pub fn layout_flowers(viewport: Viewport, layout: &BloomLayout, rng: &mut StdRng) -> Vec<Particle> {
    let BloomLayout {
        flower_size: size,
        spacing,
        top_corner_count: top,
        bottom_corner_count: bottom,
    } = *layout;
    let (w, h) = (viewport.width, viewport.height);
    let palette = |i: usize| FLOWER_PALETTE[i % FLOWER_PALETTE.len()];
    let mut out = Vec::with_capacity(2 * (top + bottom));

    for i in 0..top {
        let fi = i as f32;
        let x = spacing + fi * (size + 10.0);
        let y = spacing + (i % 2) as f32 * 20.0;
        out.push(flower(Vec2::new(x, y), size - fi * 5.0, palette(i), fi * 0.15, rng));
    }
    for i in 0..top {
        let fi = i as f32;
        let x = w - spacing - fi * (size + 10.0);
        let y = spacing + (i % 2) as f32 * 20.0;
        out.push(flower(Vec2::new(x, y), size - fi * 5.0, palette(i + 2), fi * 0.15 + 0.3, rng));
    }
    for i in 0..bottom {
        let fi = i as f32;
        let x = spacing + fi * (size + 15.0);
        let y = h - spacing - (i % 2) as f32 * 15.0;
        out.push(flower(Vec2::new(x, y), size - fi * 8.0, palette(i + 3), fi * 0.15 + 0.6, rng));
    }
    for i in 0..bottom {
        let fi = i as f32;
        let x = w - spacing - fi * (size + 15.0);
        let y = h - spacing - (i % 2) as f32 * 15.0;
        out.push(flower(Vec2::new(x, y), size - fi * 8.0, palette(i + 1), fi * 0.15 + 0.75, rng));
    }
    out
}

#[derive(Clone, Debug, Default)]
pub struct Blooms {
    elapsed: f32,
    seeded: bool,
    frozen: bool,
}

impl Blooms {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Effect for Blooms {
    fn emit(
        &mut self,
        frame: &Frame<'_>,
        _room: usize,
        rng: &mut StdRng,
        out: &mut Vec<Particle>,
    ) -> Emission {
        if !self.seeded && !frame.viewport.is_empty() {
            out.extend(layout_flowers(frame.viewport, &frame.quality.blooms, rng));
            self.seeded = true;
        }
        Emission::Continue
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.seeded && self.elapsed > BLOOM_HARD_STOP_SEC {
            log::debug!("blooms settled, freezing layer");
            self.frozen = true;
        }
    }

    fn integrate(&self, p: &mut Particle, _frame: &Frame<'_>) -> bool {
        p.phase = self.elapsed - p.delay;
        true
    }

    /// A resize skips the reveal and jumps to the settled frame.
    fn relayout(
        &mut self,
        pool: &mut Vec<Particle>,
        viewport: Viewport,
        quality: &Quality,
        rng: &mut StdRng,
    ) {
        if !self.seeded || viewport.is_empty() {
            return;
        }
        *pool = layout_flowers(viewport, &quality.blooms, rng);
        self.frozen = true;
    }

    fn draw(&self, p: &Particle, surface: &mut dyn Surface, _quality: &Quality) {
        let scale = if self.frozen {
            1.0
        } else {
            bloom_scale(p.phase, p.delay)
        };
        if scale <= 0.0 {
            return;
        }
        let s = p.size;

        surface.save();
        surface.translate(p.pos.x, p.pos.y);
        surface.rotate(p.rotation);
        surface.scale(scale);
        for i in 0..BLOOM_PETALS {
            surface.save();
            surface.rotate(i as f32 * PI / 3.0);
            surface.fill_ellipse(Vec2::new(s * 0.35, 0.0), Vec2::new(s * 0.3, s * 0.2), p.accent);
            surface.restore();
        }
        surface.fill_circle(Vec2::ZERO, s * 0.2, p.color);
        surface.set_alpha(0.4);
        surface.fill_circle(Vec2::splat(-s * 0.05), s * 0.1, Rgb::WHITE);
        surface.restore();
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elastic_reaches_one_and_stays_in_range() {
        assert_eq!(elastic_out(0.0), 0.0);
        assert_eq!(elastic_out(1.0), 1.0);
        for i in 1..100 {
            let v = elastic_out(i as f32 / 100.0);
            assert!((0.0..=1.0).contains(&v));
        }
        assert!(elastic_out(0.9) > 0.95);
    }

    #[test]
    fn hidden_before_delay_then_sways_near_one() {
        assert_eq!(bloom_scale(-0.1, 0.3), 0.0);
        for i in 0..50 {
            let s = bloom_scale(BLOOM_REVEAL_SEC + i as f32 * 0.1, 0.3);
            assert!((s - 1.0).abs() <= BLOOM_SWAY_AMPLITUDE + 1e-6);
        }
    }
}
