use card_core::color::Rgb;
use card_core::surface::{Blend, Surface};
use card_core::viewport::Viewport;
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// One effect layer: a canvas and its 2D context once it can be acquired.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: Option<web::CanvasRenderingContext2d>,
    pixel_ratio: f64,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> Self {
        let mut s = Self {
            canvas,
            ctx: None,
            pixel_ratio: 1.0,
        };
        s.acquire();
        s
    }

    pub fn from_id(document: &web::Document, id: &str) -> anyhow::Result<Self> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self::new(canvas))
    }

    /// Try to get the 2D context. Returns whether the layer is drawable.
    pub fn acquire(&mut self) -> bool {
        if self.ctx.is_some() {
            return true;
        }
        self.ctx = match self.canvas.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<web::CanvasRenderingContext2d>().ok(),
            Ok(None) => None,
            Err(e) => {
                log::warn!("2d context unavailable for #{}: {:?}", self.canvas.id(), e);
                None
            }
        };
        if self.ctx.is_some() {
            self.apply_transform();
        }
        self.ctx.is_some()
    }

    /// Match the backing store to the CSS size at the capped pixel ratio.
    pub fn resize(&mut self, viewport: Viewport, pixel_ratio: f32) {
        let (w, h) = viewport.backing_size(pixel_ratio);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", viewport.width));
        _ = style.set_property("height", &format!("{}px", viewport.height));
        self.pixel_ratio = pixel_ratio as f64;
        // Resizing the backing store resets the context state.
        self.apply_transform();
    }

    fn apply_transform(&self) {
        if let Some(ctx) = &self.ctx {
            let r = self.pixel_ratio;
            _ = ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0);
        }
    }

    fn full_rect(&self, ctx: &web::CanvasRenderingContext2d) {
        ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}

fn color(c: Rgb) -> JsValue {
    JsValue::from_str(&c.css())
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        if let Some(ctx) = &self.ctx {
            ctx.save();
            _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            ctx.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
            ctx.restore();
        }
    }

    // Erase toward transparent so the card underneath stays visible.
    fn fade(&mut self, alpha: f32) {
        if let Some(ctx) = &self.ctx {
            ctx.save();
            _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            _ = ctx.set_global_composite_operation("destination-out");
            ctx.set_global_alpha(alpha as f64);
            ctx.set_fill_style(&JsValue::from_str("#000"));
            self.full_rect(ctx);
            ctx.restore();
        }
    }

    fn save(&mut self) {
        if let Some(ctx) = &self.ctx {
            ctx.save();
        }
    }

    fn restore(&mut self) {
        if let Some(ctx) = &self.ctx {
            ctx.restore();
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        if let Some(ctx) = &self.ctx {
            _ = ctx.translate(x as f64, y as f64);
        }
    }

    fn rotate(&mut self, radians: f32) {
        if let Some(ctx) = &self.ctx {
            _ = ctx.rotate(radians as f64);
        }
    }

    fn scale(&mut self, s: f32) {
        if let Some(ctx) = &self.ctx {
            _ = ctx.scale(s as f64, s as f64);
        }
    }

    fn set_alpha(&mut self, alpha: f32) {
        if let Some(ctx) = &self.ctx {
            ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        }
    }

    fn set_blend(&mut self, blend: Blend) {
        if let Some(ctx) = &self.ctx {
            let op = match blend {
                Blend::Normal => "source-over",
                Blend::Lighter => "lighter",
            };
            _ = ctx.set_global_composite_operation(op);
        }
    }

    fn set_glow(&mut self, blur: f32, c: Rgb) {
        if let Some(ctx) = &self.ctx {
            ctx.set_shadow_blur(blur as f64);
            ctx.set_shadow_color(&c.css());
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, c: Rgb) {
        if let Some(ctx) = &self.ctx {
            ctx.set_fill_style(&color(c));
            ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, c: Rgb) {
        if let Some(ctx) = &self.ctx {
            ctx.set_fill_style(&color(c));
            ctx.begin_path();
            _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
            ctx.fill();
        }
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, c: Rgb) {
        if let Some(ctx) = &self.ctx {
            ctx.set_fill_style(&color(c));
            ctx.begin_path();
            _ = ctx.ellipse(
                center.x as f64,
                center.y as f64,
                radii.x.max(0.0) as f64,
                radii.y.max(0.0) as f64,
                0.0,
                0.0,
                TAU,
            );
            ctx.fill();
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], c: Rgb) {
        let Some(ctx) = &self.ctx else { return };
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        ctx.set_fill_style(&color(c));
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.close_path();
        ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, c: Rgb) {
        let Some(ctx) = &self.ctx else { return };
        if points.len() < 2 {
            return;
        }
        ctx.set_stroke_style(&color(c));
        ctx.set_line_width(width as f64);
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(points[0].x as f64, points[0].y as f64);
        for p in &points[1..] {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.stroke();
    }
}
