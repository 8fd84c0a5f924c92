//! Per-frame reconciliation: fade, prune, draw remote cursors.
//!
//! Runs once per display refresh for as long as the page lives. Remote
//! strokes are not redrawn here; they were painted when they arrived and
//! the fade erases them over time. Only cursor markers are repainted.

use crate::identity::short_label;
use crate::peers::PeerStore;
use crate::surface::{Canvas, RenderSurface};

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Participants dropped by this frame's eviction pass.
    pub evicted: usize,
    /// Cursor markers painted.
    pub markers_drawn: usize,
}

/// Render one frame at time `now` (ms).
pub fn render_frame<S: RenderSurface>(
    canvas: &mut Canvas<S>,
    peers: &mut PeerStore,
    now: u64,
    label_chars: usize,
) -> FrameStats {
    canvas.decay();

    let evicted = peers.evict_stale(now).len();

    let mut markers_drawn = 0;
    for peer in peers.iter() {
        let Some(position) = peer.position else {
            continue;
        };
        canvas.draw_marker(position, &peer.color, short_label(&peer.id, label_chars));
        markers_drawn += 1;
    }

    FrameStats {
        evicted,
        markers_drawn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::geometry::NormPoint;
    use crate::peers::ParticipantUpdate;
    use crate::surface::{DrawCall, RecordingSurface};

    fn setup() -> (Canvas<RecordingSurface>, PeerStore) {
        let mut canvas = Canvas::new(RecordingSurface::new(), &BoardConfig::default());
        canvas.resize(1000.0);
        canvas.surface_mut().clear();
        (canvas, PeerStore::new("me", 10_000))
    }

    #[test]
    fn test_frame_order_fade_first() {
        let (mut canvas, mut peers) = setup();
        peers.upsert("alice-1234", ParticipantUpdate::at(NormPoint::new(0.1, 0.1), "red"), 0);

        let stats = render_frame(&mut canvas, &mut peers, 100, 4);
        assert_eq!(stats, FrameStats { evicted: 0, markers_drawn: 1 });

        let calls = canvas.surface().calls();
        assert!(matches!(calls[0], DrawCall::Fade { .. }));
        assert!(matches!(calls[1], DrawCall::Marker { .. }));
        assert_eq!(canvas.surface().labels(), vec!["alic"]);
    }

    #[test]
    fn test_frame_evicts_before_drawing() {
        let (mut canvas, mut peers) = setup();
        peers.upsert("old", ParticipantUpdate::at(NormPoint::new(0.1, 0.1), "red"), 0);
        peers.upsert("new", ParticipantUpdate::at(NormPoint::new(0.2, 0.2), "blue"), 15_000);

        let stats = render_frame(&mut canvas, &mut peers, 20_000, 4);
        assert_eq!(stats.evicted, 1);
        assert_eq!(stats.markers_drawn, 1);
        assert_eq!(canvas.surface().labels(), vec!["new"]);
    }

    #[test]
    fn test_frame_skips_unknown_position() {
        let (mut canvas, mut peers) = setup();
        peers.upsert("ghost", ParticipantUpdate { position: None, color: Some("red".into()) }, 0);

        let stats = render_frame(&mut canvas, &mut peers, 10, 4);
        assert_eq!(stats.markers_drawn, 0);
        assert_eq!(peers.len(), 1);
    }

    #[test]
    fn test_empty_frame_only_fades() {
        let (mut canvas, mut peers) = setup();
        let stats = render_frame(&mut canvas, &mut peers, 0, 4);
        assert_eq!(stats, FrameStats::default());
        assert_eq!(canvas.surface().calls().len(), 1);
    }
}
