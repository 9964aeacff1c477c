// Shared helpers for host-side integration tests.

#![allow(dead_code)]

use card_core::color::Rgb;
use card_core::surface::{Blend, Surface};
use glam::Vec2;

/// Draw calls seen by [`RecordingSurface`], reduced to what tests assert on.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear,
    Fade(f32),
    Fill,
    Stroke(usize),
    Blend(Blend),
    Glow,
}

/// Surface double that records calls instead of drawing.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
    depth: i32,
}

impl RecordingSurface {
    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| f(c)).count()
    }

    pub fn fills(&self) -> usize {
        self.count(|c| *c == Call::Fill)
    }

    pub fn clears(&self) -> usize {
        self.count(|c| *c == Call::Clear)
    }

    pub fn fades(&self) -> usize {
        self.count(|c| matches!(c, Call::Fade(_)))
    }

    /// save/restore pairs are balanced.
    pub fn balanced(&self) -> bool {
        self.depth == 0
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }
    fn fade(&mut self, alpha: f32) {
        self.calls.push(Call::Fade(alpha));
    }
    fn save(&mut self) {
        self.depth += 1;
    }
    fn restore(&mut self) {
        self.depth -= 1;
    }
    fn translate(&mut self, _x: f32, _y: f32) {}
    fn rotate(&mut self, _radians: f32) {}
    fn scale(&mut self, _s: f32) {}
    fn set_alpha(&mut self, _alpha: f32) {}
    fn set_blend(&mut self, blend: Blend) {
        self.calls.push(Call::Blend(blend));
    }
    fn set_glow(&mut self, _blur: f32, _color: Rgb) {
        self.calls.push(Call::Glow);
    }
    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Rgb) {
        self.calls.push(Call::Fill);
    }
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Rgb) {
        self.calls.push(Call::Fill);
    }
    fn fill_ellipse(&mut self, _center: Vec2, _radii: Vec2, _color: Rgb) {
        self.calls.push(Call::Fill);
    }
    fn fill_polygon(&mut self, _points: &[Vec2], _color: Rgb) {
        self.calls.push(Call::Fill);
    }
    fn stroke_polyline(&mut self, points: &[Vec2], _width: f32, _color: Rgb) {
        self.calls.push(Call::Stroke(points.len()));
    }
}

pub const FRAME: f32 = 1.0 / 60.0;
