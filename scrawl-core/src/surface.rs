//! Drawing surface: the platform seam plus the board-level canvas that
//! scales normalized geometry onto it.
//!
//! ```text
//!  Canvas::draw_stroke(NormPoint, NormPoint)
//!       │  Viewport::to_pixels()
//!       ▼
//!  RenderSurface::stroke_segment(PixelPoint, PixelPoint)
//!       │
//!       ▼
//!  CanvasRenderingContext2d (browser) / RecordingSurface (tests)
//! ```

use crate::config::BoardConfig;
use crate::geometry::{clamp_unit, NormPoint, PixelPoint, Viewport};

/// Primitive draw operations a backend must provide. All coordinates are
/// pixels relative to the surface's top-left corner.
pub trait RenderSurface {
    /// Apply new pixel dimensions. Backends may clear their content.
    fn set_size(&mut self, width: f64, height: f64);

    fn stroke_segment(&mut self, from: PixelPoint, to: PixelPoint, color: &str, width: f64);

    /// Cover the whole surface with `color` at opacity `alpha`.
    fn fade(&mut self, color: &str, alpha: f64);

    fn fill_marker(&mut self, center: PixelPoint, radius: f64, color: &str);

    fn fill_label(&mut self, at: PixelPoint, text: &str, color: &str, font: &str);
}

/// The board's drawing surface at its current size.
pub struct Canvas<S: RenderSurface> {
    surface: S,
    viewport: Viewport,
    height: f64,
    stroke_width: f64,
    background: String,
    fade_alpha: f64,
    marker_radius: f64,
    label_font: String,
}

impl<S: RenderSurface> Canvas<S> {
    pub fn new(surface: S, config: &BoardConfig) -> Self {
        Self {
            surface,
            viewport: Viewport::default(),
            height: config.canvas_height,
            stroke_width: config.stroke_width,
            background: config.background.clone(),
            fade_alpha: clamp_unit(config.fade_alpha),
            marker_radius: config.marker_radius,
            label_font: config.label_font.clone(),
        }
    }

    /// Width follows the container, height is fixed.
    pub fn resize(&mut self, container_width: f64) {
        self.viewport = Viewport::new(container_width, self.height);
        self.surface.set_size(self.viewport.width, self.viewport.height);
    }

    /// Segment between two normalized points at the configured width.
    pub fn draw_stroke(&mut self, start: NormPoint, end: NormPoint, color: &str) {
        let from = self.viewport.to_pixels(start);
        let to = self.viewport.to_pixels(end);
        self.surface.stroke_segment(from, to, color, self.stroke_width);
    }

    /// One fade step. No-op when fading is disabled.
    pub fn decay(&mut self) {
        if self.fade_alpha <= 0.0 {
            return;
        }
        self.surface.fade(&self.background, self.fade_alpha);
    }

    /// Cursor dot with a name tag to its upper right.
    pub fn draw_marker(&mut self, position: NormPoint, color: &str, label: &str) {
        let center = self.viewport.to_pixels(position);
        self.surface.fill_marker(center, self.marker_radius, color);
        let offset = self.marker_radius + 3.0;
        self.surface
            .fill_label(center.offset(offset, -offset), label, color, &self.label_font);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

// ───────────────────────────────────────────────────────────────────
// Recording backend
// ───────────────────────────────────────────────────────────────────

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize { width: f64, height: f64 },
    Segment { from: PixelPoint, to: PixelPoint, color: String, width: f64 },
    Fade { color: String, alpha: f64 },
    Marker { center: PixelPoint, radius: f64, color: String },
    Label { at: PixelPoint, text: String, color: String },
}

/// Backend that records every call instead of drawing. Used by tests and
/// headless runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn segments(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Segment { .. }))
            .collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.calls.push(DrawCall::Resize { width, height });
    }

    fn stroke_segment(&mut self, from: PixelPoint, to: PixelPoint, color: &str, width: f64) {
        self.calls.push(DrawCall::Segment {
            from,
            to,
            color: color.to_string(),
            width,
        });
    }

    fn fade(&mut self, color: &str, alpha: f64) {
        self.calls.push(DrawCall::Fade {
            color: color.to_string(),
            alpha,
        });
    }

    fn fill_marker(&mut self, center: PixelPoint, radius: f64, color: &str) {
        self.calls.push(DrawCall::Marker {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_label(&mut self, at: PixelPoint, text: &str, color: &str, _font: &str) {
        self.calls.push(DrawCall::Label {
            at,
            text: text.to_string(),
            color: color.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas<RecordingSurface> {
        let mut canvas = Canvas::new(RecordingSurface::new(), &BoardConfig::default());
        canvas.resize(800.0);
        canvas.surface_mut().clear();
        canvas
    }

    #[test]
    fn test_resize_uses_fixed_height() {
        let mut canvas = Canvas::new(RecordingSurface::new(), &BoardConfig::default());
        canvas.resize(640.0);
        assert_eq!(canvas.viewport(), Viewport::new(640.0, 500.0));
        assert_eq!(
            canvas.surface().calls(),
            &[DrawCall::Resize { width: 640.0, height: 500.0 }]
        );
    }

    #[test]
    fn test_draw_stroke_scales_linearly() {
        let mut canvas = canvas();
        canvas.draw_stroke(NormPoint::new(0.5, 0.5), NormPoint::new(0.6, 0.5), "red");

        assert_eq!(
            canvas.surface().calls(),
            &[DrawCall::Segment {
                from: PixelPoint::new(400.0, 250.0),
                to: PixelPoint::new(480.0, 250.0),
                color: "red".into(),
                width: 2.0,
            }]
        );
    }

    #[test]
    fn test_stroke_follows_resize() {
        let mut canvas = canvas();
        canvas.resize(400.0);
        canvas.surface_mut().clear();
        canvas.draw_stroke(NormPoint::new(0.5, 0.0), NormPoint::new(1.0, 1.0), "red");
        match &canvas.surface().calls()[0] {
            DrawCall::Segment { from, to, .. } => {
                assert_eq!(*from, PixelPoint::new(200.0, 0.0));
                assert_eq!(*to, PixelPoint::new(400.0, 500.0));
            }
            other => panic!("Expected Segment, got {:?}", other),
        }
    }

    #[test]
    fn test_decay_uses_background() {
        let mut canvas = canvas();
        canvas.decay();
        assert_eq!(
            canvas.surface().calls(),
            &[DrawCall::Fade { color: "#ffffff".into(), alpha: 0.05 }]
        );
    }

    #[test]
    fn test_decay_disabled() {
        for alpha in [0.0, -0.5, f64::NAN] {
            let config = BoardConfig { fade_alpha: alpha, ..BoardConfig::default() };
            let mut canvas = Canvas::new(RecordingSurface::new(), &config);
            canvas.decay();
            assert!(canvas.surface().calls().is_empty(), "alpha {}", alpha);
        }
    }

    #[test]
    fn test_fade_alpha_clamped() {
        let config = BoardConfig { fade_alpha: 3.0, ..BoardConfig::default() };
        let mut canvas = Canvas::new(RecordingSurface::new(), &config);
        canvas.decay();
        assert_eq!(canvas.surface().calls(), &[DrawCall::Fade { color: "#ffffff".into(), alpha: 1.0 }]);
    }

    #[test]
    fn test_marker_and_label() {
        let mut canvas = canvas();
        canvas.draw_marker(NormPoint::new(0.25, 0.5), "blue", "ab12");

        let calls = canvas.surface().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            DrawCall::Marker { center: PixelPoint::new(200.0, 250.0), radius: 5.0, color: "blue".into() }
        );
        assert_eq!(canvas.surface().labels(), vec!["ab12"]);
    }
}
