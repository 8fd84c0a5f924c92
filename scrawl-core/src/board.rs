//! The board: one instance per page, owning every piece of client state.
//!
//! ```text
//!  InputEvent ──▶ InputCapture ──▶ Canvas::draw_stroke   (local, immediate)
//!                      │
//!                      └──────────▶ TransportAdapter::publish ──▶ bus
//!
//!  bus ──▶ Board::on_message ──▶ TransportAdapter::ingest
//!                                      │
//!                                      ▼
//!                              PeerStore::upsert ──▶ Canvas::draw_stroke (draw events)
//!
//!  rAF ──▶ Board::tick ──▶ frame::render_frame (fade, evict, markers)
//! ```
//!
//! Everything runs on one thread; the host serializes calls.

use crate::config::BoardConfig;
use crate::frame::{render_frame, FrameStats};
use crate::identity::LocalIdentity;
use crate::input::{InputCapture, InputEvent};
use crate::peers::{ParticipantUpdate, PeerStore};
use crate::protocol::EventKind;
use crate::surface::{Canvas, RenderSurface};
use crate::transport::{Transport, TransportAdapter};

pub struct Board<S: RenderSurface, T: Transport> {
    config: BoardConfig,
    identity: LocalIdentity,
    canvas: Canvas<S>,
    input: InputCapture,
    peers: PeerStore,
    transport: TransportAdapter<T>,
}

impl<S: RenderSurface, T: Transport> Board<S, T> {
    pub fn new(config: BoardConfig, identity: LocalIdentity, surface: S, transport: T) -> Self {
        log::info!(
            "Board {} created on topic {} (fade {}, eviction {}ms)",
            identity.id(),
            config.topic,
            config.fade_alpha,
            config.eviction_window_ms
        );

        let canvas = Canvas::new(surface, &config);
        let peers = PeerStore::new(identity.id(), config.eviction_window_ms);
        let transport = TransportAdapter::new(transport, config.topic.clone(), identity.clone());

        Self {
            config,
            identity,
            canvas,
            input: InputCapture::new(),
            peers,
            transport,
        }
    }

    /// Follow a container width change.
    pub fn resize(&mut self, container_width: f64) {
        self.canvas.resize(container_width);
    }

    /// Single entry point for local pointer/touch input.
    ///
    /// The local segment is painted before publishing so drawing never
    /// waits on the network.
    pub fn handle_input(&mut self, event: InputEvent) {
        let viewport = self.canvas.viewport();
        let outcome = self.input.handle(&event, &viewport);

        if let Some((start, end)) = outcome.stroke {
            self.canvas.draw_stroke(start, end, self.identity.color());
        }
        if let Some(intent) = outcome.intent {
            self.transport.publish(&intent);
        }
    }

    /// Inbound bus message. Bad payloads are logged and dropped here and
    /// never reach the caller.
    pub fn on_message(&mut self, topic: &str, payload: &str, now: u64) {
        let Some(event) = self.transport.ingest(topic, payload) else {
            return;
        };

        let position = event.position();
        let upsert = self
            .peers
            .upsert(&event.id, ParticipantUpdate::at(position, event.color.clone()), now);

        if event.kind == EventKind::Draw {
            if let Some(previous) = upsert.previous_position() {
                self.canvas.draw_stroke(previous, position, &event.color);
            }
        }
    }

    pub fn on_connected(&mut self) {
        self.transport.on_connected();
    }

    pub fn on_connection_lost(&mut self, reason: &str) {
        self.transport.on_connection_lost(reason);
    }

    /// One frame of the render loop at time `now` (ms).
    pub fn tick(&mut self, now: u64) -> FrameStats {
        render_frame(&mut self.canvas, &mut self.peers, now, self.config.label_chars)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn identity(&self) -> &LocalIdentity {
        &self.identity
    }

    pub fn peers(&self) -> &PeerStore {
        &self.peers
    }

    pub fn canvas(&self) -> &Canvas<S> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<S> {
        &mut self.canvas
    }

    pub fn transport(&self) -> &TransportAdapter<T> {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut TransportAdapter<T> {
        &mut self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{NormPoint, PixelPoint};
    use crate::surface::{DrawCall, RecordingSurface};
    use crate::transport::OfflineTransport;

    fn offline_board() -> Board<RecordingSurface, OfflineTransport> {
        let mut board = Board::new(
            BoardConfig::default(),
            LocalIdentity::new("me", "black"),
            RecordingSurface::new(),
            OfflineTransport,
        );
        board.resize(100.0);
        board.canvas_mut().surface_mut().clear();
        board
    }

    #[test]
    fn test_local_stroke_uses_own_color() {
        let mut board = offline_board();
        board.handle_input(InputEvent::PointerDown(PixelPoint::new(10.0, 50.0)));
        board.handle_input(InputEvent::PointerMove(PixelPoint::new(20.0, 100.0)));

        match board.canvas().surface().calls() {
            [DrawCall::Segment { from, to, color, .. }] => {
                assert_eq!(*from, PixelPoint::new(10.0, 50.0));
                assert_eq!(*to, PixelPoint::new(20.0, 100.0));
                assert_eq!(color, "black");
            }
            other => panic!("Expected one segment, got {:?}", other),
        }
    }

    #[test]
    fn test_move_from_unknown_peer_draws_nothing() {
        let mut board = offline_board();
        board.on_message(
            "scrawl/board",
            r#"{"type":"draw","x":0.5,"y":0.5,"id":"u1","color":"red"}"#,
            0,
        );
        assert!(board.canvas().surface().segments().is_empty());
        assert_eq!(board.peers().get("u1").unwrap().position, Some(NormPoint::new(0.5, 0.5)));
    }

    #[test]
    fn test_tick_without_peers_only_fades() {
        let mut board = offline_board();
        let stats = board.tick(16);
        assert_eq!(stats, FrameStats::default());
        assert!(matches!(board.canvas().surface().calls(), [DrawCall::Fade { .. }]));
    }
}
