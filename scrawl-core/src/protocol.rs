//! JSON wire protocol for board events.
//!
//! One flat object per message, published on the board topic:
//!
//! ```text
//! {"type":"move"|"draw","x":<f64>,"y":<f64>,"id":"<string>","color":"<css color>"}
//! ```
//!
//! `move` updates the sender's cursor. `draw` additionally paints a segment
//! from the sender's previous position to `(x, y)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::NormPoint;

/// Kind of board event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Move,
    Draw,
}

/// A locally produced event, before identity is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    pub kind: EventKind,
    pub position: NormPoint,
}

impl Intent {
    pub fn moved(position: NormPoint) -> Self {
        Self {
            kind: EventKind::Move,
            position,
        }
    }

    pub fn draw(position: NormPoint) -> Self {
        Self {
            kind: EventKind::Draw,
            position,
        }
    }
}

/// A board event as it travels over the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub x: f64,
    pub y: f64,
    pub id: String,
    pub color: String,
}

impl WireEvent {
    /// Stamp an intent with the sender's identity.
    pub fn from_intent(intent: &Intent, id: &str, color: &str) -> Self {
        Self {
            kind: intent.kind,
            x: intent.position.x,
            y: intent.position.y,
            id: id.to_string(),
            color: color.to_string(),
        }
    }

    pub fn position(&self) -> NormPoint {
        NormPoint::new(self.x, self.y)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }

    /// Parse and validate an inbound payload.
    ///
    /// Coordinates must be finite; values outside `[0, 1]` are clamped.
    pub fn decode(payload: &str) -> Result<Self, ProtocolError> {
        let mut event: WireEvent = serde_json::from_str(payload)
            .map_err(|e| ProtocolError::Deserialization(e.to_string()))?;

        if !event.x.is_finite() || !event.y.is_finite() {
            return Err(ProtocolError::InvalidField("x/y"));
        }
        if event.id.is_empty() {
            return Err(ProtocolError::InvalidField("id"));
        }

        let p = NormPoint::clamped(event.x, event.y);
        event.x = p.x;
        event.y = p.y;
        Ok(event)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Invalid field: {0}")]
    InvalidField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_field_names() {
        let event = WireEvent::from_intent(&Intent::draw(NormPoint::new(0.25, 0.75)), "u1", "red");
        let json = event.encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "draw");
        assert_eq!(value["x"], 0.25);
        assert_eq!(value["y"], 0.75);
        assert_eq!(value["id"], "u1");
        assert_eq!(value["color"], "red");
    }

    #[test]
    fn test_decode_move() {
        let event = WireEvent::decode(r#"{"type":"move","x":0.5,"y":0.5,"id":"u1","color":"red"}"#).unwrap();
        assert_eq!(event.kind, EventKind::Move);
        assert_eq!(event.position(), NormPoint::new(0.5, 0.5));
        assert_eq!(event.id, "u1");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let event =
            WireEvent::decode(r##"{"type":"draw","x":0.1,"y":0.2,"id":"a","color":"#000","v":2}"##).unwrap();
        assert_eq!(event.kind, EventKind::Draw);
    }

    #[test]
    fn test_decode_clamps_out_of_range() {
        let event = WireEvent::decode(r#"{"type":"move","x":1.7,"y":-3,"id":"a","color":"blue"}"#).unwrap();
        assert_eq!(event.position(), NormPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let err = WireEvent::decode(r#"{"type":"erase","x":0.1,"y":0.2,"id":"a","color":"red"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Deserialization(_)));
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let err = WireEvent::decode(r#"{"type":"move","x":0.1,"id":"a","color":"red"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Deserialization(_)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(WireEvent::decode("").is_err());
        assert!(WireEvent::decode("{").is_err());
        assert!(WireEvent::decode("[1,2,3]").is_err());
        assert!(WireEvent::decode(r#"{"type":"move","x":"0.1","y":0.2,"id":"a","color":"red"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_empty_id() {
        let err = WireEvent::decode(r#"{"type":"move","x":0.1,"y":0.2,"id":"","color":"red"}"#).unwrap_err();
        assert_eq!(err, ProtocolError::InvalidField("id"));
    }
}
