//! The 2D canvas render surface
//!
//! Boundary glue between the simulation and the browser drawing API. The
//! simulation never draws; this adapter reads state after each frame advance
//! and issues the draw calls.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{CollectibleKind, Finale, GameState};

/// Trail length multiplier: the segment reaches backward along the velocity
const TRAIL_SCALE: f32 = 2.0;
const SPARK_RADIUS: f64 = 2.5;
const HALO_RADIUS: f64 = 28.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    view: Vec2,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut renderer = Self {
            canvas,
            ctx,
            view: Vec2::ZERO,
        };
        renderer.resize()?;
        Ok(renderer)
    }

    /// Size the backing store to viewport * device pixel ratio and rebuild
    /// the transform so simulation coordinates stay screen-accurate
    pub fn resize(&mut self) -> Result<Vec2, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let dpr = window.device_pixel_ratio();
        let w = window.inner_width()?.as_f64().unwrap_or(0.0);
        let h = window.inner_height()?.as_f64().unwrap_or(0.0);
        self.canvas.set_width((w * dpr) as u32);
        self.canvas.set_height((h * dpr) as u32);
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        self.view = Vec2::new(w as f32, h as f32);
        Ok(self.view)
    }

    pub fn view(&self) -> Vec2 {
        self.view
    }

    /// Clear and redraw the scene
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (self.view.x as f64, self.view.y as f64);

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("rgba(255, 190, 70, 0.05)");
        ctx.fill_rect(0.0, 0.0, w, h);

        self.draw_fireworks(state)?;
        self.draw_sparks(state)?;
        self.draw_collectibles(state)?;

        // Explosion flash, one frame, painted over the whole scene
        if state.flash > 0.0 {
            ctx.set_fill_style_str(&format!("rgba(255, 200, 100, {})", state.flash));
            ctx.fill_rect(0.0, 0.0, w, h);
        }

        if let Some(finale) = &state.finale {
            self.draw_finale(finale)?;
        }

        Ok(())
    }

    /// Rising fireworks draw as short additive trail segments
    fn draw_fireworks(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_composite_operation("lighter")?;
        ctx.set_line_width(2.0);
        for fw in &state.fireworks {
            let tail = fw.pos - fw.vel * TRAIL_SCALE;
            ctx.set_stroke_style_str(&fw.color.css());
            ctx.begin_path();
            ctx.move_to(fw.pos.x as f64, fw.pos.y as f64);
            ctx.line_to(tail.x as f64, tail.y as f64);
            ctx.stroke();
        }
        ctx.set_global_composite_operation("source-over")?;
        Ok(())
    }

    fn draw_sparks(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_composite_operation("lighter")?;
        for spark in &state.sparks {
            ctx.set_fill_style_str(&spark.color.css());
            ctx.begin_path();
            ctx.arc(spark.pos.x as f64, spark.pos.y as f64, SPARK_RADIUS, 0.0, TAU)?;
            ctx.fill();
        }
        ctx.set_global_composite_operation("source-over")?;
        Ok(())
    }

    /// Diyas and bombs: ambient halo behind a flickering emoji glyph
    fn draw_collectibles(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font("30px Poppins, system-ui");

        for c in &state.collectibles {
            let (x, y) = (c.pos.x as f64, c.pos.y as f64);
            let glow = c.glow() as f64;

            let (halo, shadow, glyph) = match c.kind {
                CollectibleKind::Bomb => (
                    "rgba(255, 120, 30, 0.25)",
                    format!("rgba(255, 140, 40, {glow})"),
                    "\u{1F4A3}",
                ),
                CollectibleKind::Diya => (
                    "rgba(255, 180, 80, 0.25)",
                    format!("rgba(255, 200, 80, {glow})"),
                    "\u{1FA94}",
                ),
            };

            ctx.begin_path();
            ctx.arc(x, y, HALO_RADIUS, 0.0, TAU)?;
            ctx.set_fill_style_str(halo);
            ctx.fill();

            ctx.set_shadow_color(&shadow);
            ctx.set_shadow_blur(16.0 * glow);
            ctx.fill_text(glyph, x, y)?;
            ctx.set_shadow_blur(0.0);
        }

        ctx.restore();
        Ok(())
    }

    /// Centerpiece glow animation, then the closing message
    fn draw_finale(&self, finale: &Finale) -> Result<(), JsValue> {
        let Some(glow) = finale.glow else {
            return Ok(());
        };
        let ctx = &self.ctx;
        let (w, h) = (self.view.x as f64, self.view.y as f64);
        let (cx, cy) = (w / 2.0, h / 2.0);

        ctx.save();
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        if !finale.glow_finished() {
            let pulse = (glow as f64).sin() * 0.5 + 0.5;
            ctx.set_font("90px Poppins, system-ui");
            ctx.set_shadow_color(&format!("rgba(255, 200, 80, {pulse})"));
            ctx.set_shadow_blur(40.0);
            ctx.set_fill_style_str("#ffd56a");
            ctx.fill_text("\u{1FA94}", cx, cy)?;
        } else {
            ctx.set_font("42px Poppins, system-ui");
            ctx.set_fill_style_str("#ffd56a");
            ctx.set_shadow_color("#ffb347");
            ctx.set_shadow_blur(25.0);
            ctx.fill_text("\u{2728} Happy Diwali! \u{2728}", cx, cy + 100.0)?;
        }

        ctx.restore();
        Ok(())
    }
}
