//! # scrawl-core: shared whiteboard client logic
//!
//! Participants draw on a common canvas and see each other's cursors.
//! Events travel over an external publish/subscribe bus; nothing is
//! stored anywhere, and drawings fade away on their own.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  intents   ┌──────────────────┐   JSON    ┌─────────┐
//! │ InputCapture │ ─────────▶ │ TransportAdapter │ ────────▶ │   bus   │
//! └──────┬───────┘            └────────▲─────────┘           └────┬────┘
//!        │ local segment               │ remote events            │
//!        ▼                             │                          │
//! ┌──────────────┐  markers   ┌────────┴─────────┐ ◀──────────────┘
//! │    Canvas    │ ◀───────── │ PeerStore + tick │
//! └──────────────┘            └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: normalized ↔ pixel coordinates
//! - [`surface`]: render-surface trait and the scaling canvas
//! - [`input`]: pointer/touch → move/draw intents
//! - [`peers`]: remote participant store with staleness eviction
//! - [`protocol`]: JSON wire events
//! - [`transport`]: pub/sub adapter (publish, ingest, self-filtering)
//! - [`frame`]: per-frame fade, eviction and cursor drawing
//! - [`board`]: the component that owns all of the above
//! - [`config`]: board settings
//! - [`identity`]: local participant id and color

pub mod board;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod identity;
pub mod input;
pub mod peers;
pub mod protocol;
pub mod surface;
pub mod transport;

// Re-exports for convenience
pub use board::Board;
pub use config::{BoardConfig, BrokerConfig, ConfigError};
pub use frame::FrameStats;
pub use geometry::{NormPoint, PixelPoint, Viewport};
pub use identity::LocalIdentity;
pub use input::{InputCapture, InputEvent, InputOutcome};
pub use peers::{Participant, ParticipantUpdate, PeerStore, Upsert};
pub use protocol::{EventKind, Intent, ProtocolError, WireEvent};
pub use surface::{Canvas, DrawCall, RecordingSurface, RenderSurface};
pub use transport::{OfflineTransport, Transport, TransportAdapter, TransportError, TransportStats};
