//! Transient store of remote participants.
//!
//! Maps participant id → last known position, color and last-seen time.
//! Entries are created by the first inbound event from an unseen id and
//! disappear once they have been silent for longer than the eviction
//! window. Nothing here is persisted.
//!
//! The local identity is never admitted, even if a caller forgets to
//! filter it upstream.

use std::collections::HashMap;

use crate::geometry::NormPoint;

/// A remote participant as last seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
    /// `None` until an event carrying a position arrives.
    pub position: Option<NormPoint>,
    pub color: String,
    /// Milliseconds, same clock as the `now` passed to the store.
    pub last_seen: u64,
}

/// Fields to merge into a participant record. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantUpdate {
    pub position: Option<NormPoint>,
    pub color: Option<String>,
}

impl ParticipantUpdate {
    pub fn at(position: NormPoint, color: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            color: Some(color.into()),
        }
    }
}

/// Result of [`PeerStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upsert {
    /// First event from this id.
    Created,
    /// Existing record merged; carries the position held before the merge.
    Updated { previous: Option<NormPoint> },
    /// The id is the local identity.
    Rejected,
}

impl Upsert {
    /// Position before this update, if the participant had one.
    pub fn previous_position(&self) -> Option<NormPoint> {
        match self {
            Upsert::Updated { previous } => *previous,
            _ => None,
        }
    }
}

/// Participant table keyed by id.
pub struct PeerStore {
    local_id: String,
    peers: HashMap<String, Participant>,
    eviction_window_ms: u64,
}

impl PeerStore {
    pub fn new(local_id: impl Into<String>, eviction_window_ms: u64) -> Self {
        Self {
            local_id: local_id.into(),
            peers: HashMap::new(),
            eviction_window_ms,
        }
    }

    /// Merge `update` into the record for `id`, creating it if absent, and
    /// refresh its last-seen time. Last write wins per field.
    pub fn upsert(&mut self, id: &str, update: ParticipantUpdate, now: u64) -> Upsert {
        if id == self.local_id {
            return Upsert::Rejected;
        }

        match self.peers.get_mut(id) {
            Some(peer) => {
                let previous = peer.position;
                if let Some(position) = update.position {
                    peer.position = Some(position);
                }
                if let Some(color) = update.color {
                    peer.color = color;
                }
                peer.last_seen = now;
                Upsert::Updated { previous }
            }
            None => {
                log::debug!("Participant {} appeared", id);
                self.peers.insert(
                    id.to_string(),
                    Participant {
                        id: id.to_string(),
                        position: update.position,
                        color: update.color.unwrap_or_default(),
                        last_seen: now,
                    },
                );
                Upsert::Created
            }
        }
    }

    /// Drop every participant silent for longer than the window.
    ///
    /// A participant seen exactly `window` ms ago is kept. Returns the
    /// evicted ids.
    pub fn evict_stale(&mut self, now: u64) -> Vec<String> {
        let window = self.eviction_window_ms;
        let stale: Vec<String> = self
            .peers
            .values()
            .filter(|p| now.saturating_sub(p.last_seen) > window)
            .map(|p| p.id.clone())
            .collect();

        for id in &stale {
            self.peers.remove(id);
        }
        if !stale.is_empty() {
            log::debug!("Evicted {} idle participant(s)", stale.len());
        }

        stale
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.peers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.peers.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.peers.values()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
