//! Gnome placement inside the padded safe area of the viewport.

use crate::config::{Padding, Quality};
use crate::constants::*;
use crate::system::sample;
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;

/// Idle float animation parameters handed to the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatPhase {
    pub delay: f32,
    pub duration: f32,
    pub tilt_deg: f32,
}

impl FloatPhase {
    pub fn random(rng: &mut StdRng) -> Self {
        Self {
            delay: sample(rng, GNOME_FLOAT_DELAY),
            duration: sample(rng, GNOME_FLOAT_DURATION),
            tilt_deg: sample(rng, GNOME_TILT_DEG),
        }
    }

    /// CSS custom properties driving the float keyframes. The alternate half
    /// of the keyframe swings the other way.
    pub fn style_vars(&self) -> [(&'static str, String); 4] {
        [
            ("--float-delay", format!("{:.2}s", self.delay)),
            ("--float-duration", format!("{:.2}s", self.duration)),
            ("--tilt", format!("{:.1}deg", self.tilt_deg)),
            ("--float-rotate-alt", format!("{:.1}deg", -self.tilt_deg)),
        ]
    }
}

/// One clickable gnome. `pos` is the top-left corner in CSS pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct GnomeSprite {
    pub id: usize,
    pub pos: Vec2,
    pub size: Vec2,
    /// `None` when reduced motion is requested.
    pub float: Option<FloatPhase>,
    pub visible: bool,
    pub locked: bool,
}

impl GnomeSprite {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Sprite metrics and candidate bounds for one viewport.
#[derive(Clone, Copy, Debug)]
pub struct GnomeLayout {
    pub sprite: Vec2,
    pub min: Vec2,
    pub max: Vec2,
    pub min_distance: f32,
    pub float: bool,
}

impl GnomeLayout {
    pub fn new(viewport: Viewport, quality: &Quality) -> Self {
        let w = quality.gnome_width;
        let h = (w * GNOME_ASPECT_RATIO).round();
        let Padding { top, bottom, side } = quality.padding;
        let min = Vec2::new(side, top);
        let max = Vec2::new(
            side.max(viewport.width - side - w),
            top.max(viewport.height - bottom - h),
        );
        Self {
            sprite: Vec2::new(w, h),
            min,
            max,
            min_distance: w * GNOME_MIN_DISTANCE_FACTOR,
            float: quality.motion_scale >= 1.0,
        }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    fn candidate(&self, rng: &mut StdRng) -> Vec2 {
        Vec2::new(
            sample(rng, (self.min.x, self.max.x)),
            sample(rng, (self.min.y, self.max.y)),
        )
    }

    /// Pick a position away from `others`; keeps the last try if none is far enough.
    fn pick(&self, others: impl Iterator<Item = Vec2> + Clone, rng: &mut StdRng) -> Vec2 {
        let mut pos = self.candidate(rng);
        for _ in 0..GNOME_POSITION_ATTEMPTS {
            if others.clone().all(|o| o.distance(pos) >= self.min_distance) {
                break;
            }
            pos = self.candidate(rng);
        }
        pos
    }

    fn sprite(&self, id: usize, pos: Vec2, rng: &mut StdRng) -> GnomeSprite {
        GnomeSprite {
            id,
            pos,
            size: self.sprite,
            float: self.float.then(|| FloatPhase::random(rng)),
            visible: true,
            locked: false,
        }
    }
}

/// Lay out `count` fresh sprites.
pub fn place_all(
    count: usize,
    viewport: Viewport,
    quality: &Quality,
    rng: &mut StdRng,
) -> Vec<GnomeSprite> {
    let layout = GnomeLayout::new(viewport, quality);
    let mut out: Vec<GnomeSprite> = Vec::with_capacity(count);
    for id in 0..count {
        let pos = layout.pick(out.iter().map(|g| g.pos), rng);
        let sprite = layout.sprite(id, pos, rng);
        out.push(sprite);
    }
    out
}

/// Move sprite `id` to a new spot; every other sprite is returned untouched.
/// An unknown id returns the input unchanged.
pub fn relocate_one(
    gnomes: &[GnomeSprite],
    id: usize,
    viewport: Viewport,
    quality: &Quality,
    rng: &mut StdRng,
) -> Vec<GnomeSprite> {
    let mut out = gnomes.to_vec();
    let Some(index) = out.iter().position(|g| g.id == id) else {
        return out;
    };
    let layout = GnomeLayout::new(viewport, quality);
    let others = gnomes.iter().filter(|g| g.id != id).map(|g| g.pos);
    let pos = layout.pick(others, rng);
    let moved = &mut out[index];
    moved.pos = pos;
    moved.size = layout.sprite;
    out
}
