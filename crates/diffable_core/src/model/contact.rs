//! Contact domain model.
//!
//! # Responsibility
//! - Define the payload rendered by one contact row.
//! - Define the two list sections a contact can live in.
//!
//! # Invariants
//! - A `ContactId` is stable and never reused for another contact.
//! - Identity lives only in the snapshot item, never in the payload, so two
//!   contacts may share every displayed field.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier used to match contact rows across snapshots.
pub type ContactId = Uuid;

/// List section a contact is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSection {
    /// Leadership contacts, shown first.
    #[default]
    Primary,
    /// Everyone else.
    Secondary,
}

impl ContactSection {
    /// Every section in display order.
    pub const ALL: [ContactSection; 2] = [ContactSection::Primary, ContactSection::Secondary];

    /// User-facing section header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Primary => "CEO",
            Self::Secondary => "Peasants",
        }
    }

    /// Stable string id used across the FFI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }

    /// Parses the FFI string id. Accepts header titles too.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "primary" | "ceo" => Some(Self::Primary),
            "secondary" | "peasants" => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Generates a fresh contact identity.
pub fn new_contact_id() -> ContactId {
    Uuid::new_v4()
}

/// Payload of one contact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name as entered in the add form.
    pub name: String,
    /// Star toggle driven by the favourite swipe action.
    pub is_favourite: bool,
}

impl Contact {
    /// Creates a non-favourite contact.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_favourite: false,
        }
    }

    /// Returns a copy with the favourite flag flipped.
    pub fn toggled_favourite(&self) -> Self {
        Self {
            is_favourite: !self.is_favourite,
            ..self.clone()
        }
    }
}
