//! Adapter between the board and the external pub/sub bus.
//!
//! The bus client (connection, reconnection, TLS, broker) is not ours;
//! it is reached through the [`Transport`] trait so a test double or an
//! offline stand-in can take its place.
//!
//! Outbound: intents are stamped with the local identity, encoded as JSON
//! and sent on the board topic. Nothing is queued: while disconnected,
//! positions are dropped because the next event supersedes them anyway.
//!
//! Inbound: payloads are decoded, malformed ones are logged and dropped,
//! and events carrying our own id are discarded.

use thiserror::Error;

use crate::identity::LocalIdentity;
use crate::protocol::{Intent, WireEvent};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Not connected")]
    NotConnected,
    #[error("Send failed: {0}")]
    Send(String),
    #[error("Subscribe failed: {0}")]
    Subscribe(String),
}

/// Capabilities the board needs from a pub/sub client.
pub trait Transport {
    fn is_connected(&self) -> bool;

    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError>;

    fn send(&mut self, topic: &str, payload: &str) -> Result<(), TransportError>;
}

/// Stand-in used when no bus client is available. The board keeps working
/// as a single-user whiteboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn is_connected(&self) -> bool {
        false
    }

    fn subscribe(&mut self, _topic: &str) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }

    fn send(&mut self, _topic: &str, _payload: &str) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    pub published: u64,
    pub dropped: u64,
    pub received: u64,
    pub malformed: u64,
    pub own_echoes: u64,
}

/// Wraps a [`Transport`] with the board topic and local identity.
pub struct TransportAdapter<T: Transport> {
    transport: T,
    topic: String,
    identity: LocalIdentity,
    stats: TransportStats,
}

impl<T: Transport> TransportAdapter<T> {
    pub fn new(transport: T, topic: impl Into<String>, identity: LocalIdentity) -> Self {
        Self {
            transport,
            topic: topic.into(),
            identity,
            stats: TransportStats::default(),
        }
    }

    /// Publish an intent. Returns `true` if it was handed to the bus.
    ///
    /// Silently does nothing while disconnected.
    pub fn publish(&mut self, intent: &Intent) -> bool {
        if !self.transport.is_connected() {
            self.stats.dropped += 1;
            return false;
        }

        let event = WireEvent::from_intent(intent, self.identity.id(), self.identity.color());
        let payload = match event.encode() {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Dropping unencodable event: {}", e);
                self.stats.dropped += 1;
                return false;
            }
        };

        match self.transport.send(&self.topic, &payload) {
            Ok(()) => {
                self.stats.published += 1;
                true
            }
            Err(e) => {
                log::debug!("Send on {} failed, dropping: {}", self.topic, e);
                self.stats.dropped += 1;
                false
            }
        }
    }

    /// Decode and filter an inbound message.
    ///
    /// Returns `None` for other topics, malformed payloads and our own
    /// echoes. Never panics on bad input.
    pub fn ingest(&mut self, topic: &str, payload: &str) -> Option<WireEvent> {
        if topic != self.topic {
            return None;
        }
        self.stats.received += 1;

        let event = match WireEvent::decode(payload) {
            Ok(event) => event,
            Err(e) => {
                self.stats.malformed += 1;
                log::warn!("Discarding malformed message on {}: {}", topic, e);
                return None;
            }
        };

        if event.id == self.identity.id() {
            self.stats.own_echoes += 1;
            return None;
        }

        Some(event)
    }

    /// Called once the collaborator reports a successful connect.
    pub fn on_connected(&mut self) {
        match self.transport.subscribe(&self.topic) {
            Ok(()) => log::info!("Subscribed to {}", self.topic),
            Err(e) => log::warn!("Subscribe to {} failed: {}", self.topic, e),
        }
    }

    /// Called when the collaborator loses its connection. Publishing stops
    /// until the collaborator reports connected again.
    pub fn on_connection_lost(&mut self, reason: &str) {
        log::warn!("Bus connection lost: {}", reason);
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn stats(&self) -> TransportStats {
        self.stats
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
