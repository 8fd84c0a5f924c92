//! `RenderSurface` on a 2D canvas context.

use std::f64::consts::TAU;

use scrawl_core::{PixelPoint, RenderSurface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Width available to the canvas: its parent's width, or its own.
    pub fn container_width(&self) -> f64 {
        self.canvas
            .parent_element()
            .map(|parent| parent.client_width())
            .unwrap_or_else(|| self.canvas.client_width()) as f64
    }
}

impl RenderSurface for CanvasSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.round() as u32);
        self.canvas.set_height(height.round() as u32);
        // Resizing resets the context state.
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    fn stroke_segment(&mut self, from: PixelPoint, to: PixelPoint, color: &str, width: f64) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fade(&mut self, color: &str, alpha: f64) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.ctx.restore();
    }

    fn fill_marker(&mut self, center: PixelPoint, radius: f64, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            log::debug!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn fill_label(&mut self, at: PixelPoint, text: &str, color: &str, font: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        if let Err(e) = self.ctx.fill_text(text, at.x, at.y) {
            log::debug!("fill_text failed: {:?}", e);
        }
    }
}
