//! Local participant identity.

use uuid::Uuid;

/// Identity of this board instance: generated once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    id: String,
    color: String,
}

impl LocalIdentity {
    /// Fresh random id with a color derived from it.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        Self {
            id: uuid.simple().to_string(),
            color: color_for(uuid),
        }
    }

    /// Explicit identity (tests, or a host page that wants a fixed id).
    pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Stable, vivid CSS color for a UUID.
///
/// Hue comes from the UUID bits; saturation and lightness are fixed so
/// every participant gets a readable cursor on a white background.
pub fn color_for(id: Uuid) -> String {
    let hue = id.as_u128() % 360;
    format!("hsl({hue}, 70%, 60%)")
}

/// First `chars` characters of an id, for name tags.
pub fn short_label(id: &str, chars: usize) -> &str {
    match id.char_indices().nth(chars) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
