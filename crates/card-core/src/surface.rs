//! Minimal 2D drawing surface the particle systems render into.
//!
//! The browser host implements this over `CanvasRenderingContext2d`; tests use
//! a recording double. Coordinates are CSS pixels; the host owns the
//! device-pixel transform.

use crate::color::Rgb;
use glam::Vec2;

/// How a layer is prepared at the start of each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearMode {
    /// Wipe to transparent.
    Clear,
    /// Erase a fraction of what is there, leaving motion trails.
    Fade(f32),
    /// Leave the previous frame untouched.
    Retain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Normal,
    /// Additive; overlapping sparks brighten.
    Lighter,
}

pub trait Surface {
    /// Wipe the whole surface to transparent.
    fn clear(&mut self);
    /// Erase `alpha` of the existing content across the whole surface.
    fn fade(&mut self, alpha: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, s: f32);

    fn set_alpha(&mut self, alpha: f32);
    fn set_blend(&mut self, blend: Blend);
    /// Soft glow around subsequent fills; `blur == 0` disables it.
    fn set_glow(&mut self, blur: f32, color: Rgb);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgb);
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb);
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgb);
}

/// Vertices of a five-pointed star centred on the origin.
pub fn star_points(outer: f32, inner: f32) -> [Vec2; 10] {
    let mut pts = [Vec2::ZERO; 10];
    for (i, p) in pts.iter_mut().enumerate() {
        let angle = i as f32 * std::f32::consts::PI / 5.0 - std::f32::consts::FRAC_PI_2;
        let r = if i % 2 == 0 { outer } else { inner };
        *p = Vec2::new(angle.cos() * r, angle.sin() * r);
    }
    pts
}

/// Four-pointed sparkle (thin diamond cross) centred on the origin.
pub fn sparkle_points(radius: f32) -> [Vec2; 8] {
    let thin = radius * 0.28;
    [
        Vec2::new(0.0, -radius),
        Vec2::new(thin, -thin),
        Vec2::new(radius, 0.0),
        Vec2::new(thin, thin),
        Vec2::new(0.0, radius),
        Vec2::new(-thin, thin),
        Vec2::new(-radius, 0.0),
        Vec2::new(-thin, -thin),
    ]
}

const HEART_STEPS: usize = 6;

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Heart outline of height `size` centred on the origin, point down. Four
/// cubic lobes flattened to a polygon.
pub fn heart_points(size: f32) -> [Vec2; 4 * HEART_STEPS] {
    let half = size / 2.0;
    let notch = size * 0.3;
    let v = |x: f32, y: f32| Vec2::new(x, y - half);
    let segments = [
        [v(0.0, notch), v(0.0, 0.0), v(-half, 0.0), v(-half, notch)],
        [v(-half, notch), v(-half, size * 0.5), v(0.0, size * 0.7), v(0.0, size)],
        [v(0.0, size), v(0.0, size * 0.7), v(half, size * 0.5), v(half, notch)],
        [v(half, notch), v(half, 0.0), v(0.0, 0.0), v(0.0, notch)],
    ];
    let mut pts = [Vec2::ZERO; 4 * HEART_STEPS];
    for (seg, c) in segments.iter().enumerate() {
        for step in 0..HEART_STEPS {
            let t = (step + 1) as f32 / HEART_STEPS as f32;
            pts[seg * HEART_STEPS + step] = cubic(c[0], c[1], c[2], c[3], t);
        }
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_alternates_radii() {
        let pts = star_points(10.0, 4.0);
        assert!((pts[0].length() - 10.0).abs() < 1e-4);
        assert!((pts[1].length() - 4.0).abs() < 1e-4);
        // first point straight up
        assert!(pts[0].y < 0.0 && pts[0].x.abs() < 1e-4);
    }

    #[test]
    fn heart_fits_its_box_and_points_down() {
        let pts = heart_points(20.0);
        for p in &pts {
            assert!(p.x.abs() <= 10.0 + 1e-4 && p.y.abs() <= 10.0 + 1e-4, "{p:?}");
        }
        // tip at the bottom centre, notch back where the outline started
        let tip = pts[2 * HEART_STEPS - 1];
        assert!(tip.x.abs() < 1e-4 && (tip.y - 10.0).abs() < 1e-4);
        let last = pts[pts.len() - 1];
        assert!(last.x.abs() < 1e-4 && (last.y + 4.0).abs() < 1e-4);
        // mirror symmetric
        let left = pts.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        let right = pts.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((left + right).abs() < 1e-3);
    }
}
