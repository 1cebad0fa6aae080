use crate::core::color::hsl;
use crate::core::{CometSky, ConfettiField, FrameParams, PointField};
use anyhow::anyhow;
use glam::Vec2;
use std::f64::consts::TAU;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D canvas painter. Works in CSS pixels; the device pixel ratio is folded
/// into the context transform on every resize.
pub struct Painter {
    ctx: web::CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("getContext: {:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self { ctx })
    }

    pub fn set_scale(&self, dpr: f32) {
        _ = self
            .ctx
            .set_transform(dpr as f64, 0.0, 0.0, dpr as f64, 0.0, 0.0);
    }

    pub fn background(&self, p: &FrameParams, size: Vec2) {
        let (w, h) = (size.x as f64, size.y as f64);
        let inner = hsl(p.hue_deg, 0.9, 0.25 + 0.35 * p.intensity);
        let outer = hsl(p.hue_deg + 40.0, 0.8, 0.05 + 0.08 * p.intensity);
        let radius = (w.hypot(h) * p.radius_frac as f64).max(1.0);
        self.ctx.set_global_alpha(1.0);
        match self
            .ctx
            .create_radial_gradient(w * 0.5, 0.0, 0.0, w * 0.5, 0.0, radius)
        {
            Ok(g) => {
                _ = g.add_color_stop(0.0, &inner.css());
                _ = g.add_color_stop(1.0, &outer.css());
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
            Err(_) => self.ctx.set_fill_style_str(&outer.css()),
        }
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    pub fn points(&self, field: &PointField) {
        self.ctx.set_global_alpha(0.9);
        for pt in field.iter() {
            self.ctx.begin_path();
            _ = self.ctx.arc(
                pt.pos.x as f64,
                pt.pos.y as f64,
                pt.radius as f64,
                0.0,
                TAU,
            );
            self.ctx.set_fill_style_str(&pt.color.css());
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }

    pub fn comets(&self, sky: &CometSky, now: Duration, speed: f32) {
        self.ctx.set_line_cap("round");
        for c in sky.iter() {
            let head = c.head(now, speed);
            let tail = c.tail(now, speed);
            let alpha = c.alpha(now);
            let g = self.ctx.create_linear_gradient(
                tail.x as f64,
                tail.y as f64,
                head.x as f64,
                head.y as f64,
            );
            _ = g.add_color_stop(0.0, &c.color.css_alpha(0.0));
            _ = g.add_color_stop(1.0, &c.color.css_alpha(alpha));
            self.ctx.set_stroke_style_canvas_gradient(&g);
            self.ctx.set_line_width(c.width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(tail.x as f64, tail.y as f64);
            self.ctx.line_to(head.x as f64, head.y as f64);
            self.ctx.stroke();
        }
    }

    pub fn confetti(&self, field: &ConfettiField) {
        for p in field.iter() {
            let wob = p.wobble_offset();
            let (x, y) = (p.pos.x as f64, p.pos.y as f64);
            self.ctx.set_global_alpha(p.life().clamp(0.0, 1.0) as f64);
            self.ctx.set_fill_style_str(&p.color.css());
            self.ctx.begin_path();
            self.ctx.move_to(x, y);
            self.ctx.line_to(x + wob.x as f64, y + (wob.y * p.tilt.cos()) as f64);
            self.ctx.line_to(
                x + (wob.x + p.size * 0.6) as f64,
                y + (wob.y + p.size * 0.6 * p.tilt.sin()) as f64,
            );
            self.ctx.line_to(x + (p.size * 0.6) as f64, y + (p.size * 0.6 * p.tilt.sin()) as f64);
            self.ctx.close_path();
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }
}
