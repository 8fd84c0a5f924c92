//! Local pointer/touch capture.
//!
//! Turns raw canvas events into move/draw intents and the local segment
//! to paint right away. Touch events behave exactly like pointer events
//! driven by the first touch point.
//!
//! Pressing publishes a `move` to the anchor so peers start the stroke
//! where it starts locally, even without hover moves (touch).
//!
//! ```text
//!            down                move (drawing)
//!  Idle ───────────▶ Drawing ─────────────────┐
//!   ▲                   │  ▲                   │ segment anchor→pos,
//!   │ up / leave        │  └───────────────────┘ anchor = pos
//!   └───────────────────┘
//! ```

use crate::geometry::{NormPoint, PixelPoint, Viewport};
use crate::protocol::Intent;

/// A canvas input event, in canvas-relative pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PixelPoint),
    PointerMove(PixelPoint),
    PointerUp,
    PointerLeave,
    TouchStart(Vec<PixelPoint>),
    TouchMove(Vec<PixelPoint>),
    TouchEnd,
    TouchCancel,
}

/// Pointer-level action after touch folding.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Down(PixelPoint),
    Move(PixelPoint),
    Release,
}

impl InputEvent {
    fn action(&self) -> Option<Action> {
        match self {
            InputEvent::PointerDown(p) => Some(Action::Down(*p)),
            InputEvent::PointerMove(p) => Some(Action::Move(*p)),
            InputEvent::TouchStart(touches) => touches.first().map(|p| Action::Down(*p)),
            InputEvent::TouchMove(touches) => touches.first().map(|p| Action::Move(*p)),
            InputEvent::PointerUp
            | InputEvent::PointerLeave
            | InputEvent::TouchEnd
            | InputEvent::TouchCancel => Some(Action::Release),
        }
    }
}

/// What the board should do with one input event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputOutcome {
    /// Intent to publish.
    pub intent: Option<Intent>,
    /// Local segment to render immediately.
    pub stroke: Option<(NormPoint, NormPoint)>,
}

/// Drawing-mode state machine for the local user.
#[derive(Debug, Default)]
pub struct InputCapture {
    drawing: bool,
    anchor: Option<NormPoint>,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &InputEvent, viewport: &Viewport) -> InputOutcome {
        let Some(action) = event.action() else {
            return InputOutcome::default();
        };

        match action {
            Action::Down(p) => {
                let anchor = viewport.normalize(p);
                self.drawing = true;
                self.anchor = Some(anchor);
                InputOutcome {
                    intent: Some(Intent::moved(anchor)),
                    stroke: None,
                }
            }
            Action::Move(p) => {
                let position = viewport.normalize(p);
                if !self.drawing {
                    return InputOutcome {
                        intent: Some(Intent::moved(position)),
                        stroke: None,
                    };
                }

                let start = self.anchor.unwrap_or(position);
                self.anchor = Some(position);
                InputOutcome {
                    intent: Some(Intent::draw(position)),
                    stroke: Some((start, position)),
                }
            }
            Action::Release => {
                self.drawing = false;
                self.anchor = None;
                InputOutcome::default()
            }
        }
    }
}
