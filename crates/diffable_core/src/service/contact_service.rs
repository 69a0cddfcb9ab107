//! Contact list use-case service.
//!
//! # Responsibility
//! - Own the contact list reconciler and its committed snapshot.
//! - Translate add/delete/favourite intents into one commit each.
//!
//! # Invariants
//! - Every successful mutation performs exactly one commit.
//! - Failed mutations leave the committed snapshot untouched.
//! - Rows are addressed by committed position, resolved through the
//!   reconciler index.

use crate::config::ReconcilerConfig;
use crate::diff::{EditScript, Reconciler};
use crate::model::contact::{new_contact_id, Contact, ContactId, ContactSection};
use crate::render::row::{describe_row, RowContent, RowDescription};
use crate::snapshot::{Position, Snapshot, SnapshotError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ContactSnapshot = Snapshot<ContactSection, ContactId, Contact>;
pub type ContactScript = EditScript<ContactSection, ContactId, Contact>;
pub type ContactResult<T> = Result<T, ContactServiceError>;

const SEED_PRIMARY: &[&str] = &["Diana", "Maks"];
const SEED_SECONDARY: &[&str] = &["Some"];

/// Errors from contact list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactServiceError {
    /// Name is blank after trim.
    InvalidName,
    /// No contact is rendered at the position.
    PositionNotFound(Position),
    /// Snapshot builder or commit validation failure.
    Snapshot(SnapshotError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "contact name must not be blank"),
            Self::PositionNotFound(position) => write!(f, "no contact at position {position}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SnapshotError> for ContactServiceError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Input of the add-contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddContactForm {
    pub name: String,
    pub section: ContactSection,
}

impl AddContactForm {
    pub fn new(name: impl Into<String>, section: ContactSection) -> Self {
        Self {
            name: name.into(),
            section,
        }
    }
}

/// Rows of one section, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRows {
    pub section: ContactSection,
    pub header: RowDescription,
    pub rows: Vec<RowDescription>,
}

/// Contact list facade over one reconciler.
#[derive(Debug, Clone, Default)]
pub struct ContactListService {
    reconciler: Reconciler<ContactSection, ContactId, Contact>,
}

impl ContactListService {
    /// Creates an empty list with no sections committed yet.
    pub fn new(config: ReconcilerConfig) -> Self {
        Self {
            reconciler: Reconciler::new(config),
        }
    }

    /// Creates a list holding the demo contacts.
    pub fn seeded(config: ReconcilerConfig) -> ContactResult<Self> {
        let mut service = Self::new(config);
        service.seed()?;
        Ok(service)
    }

    /// Appends both sections and the demo contacts, then commits.
    ///
    /// # Errors
    /// - `Snapshot(DuplicateSection)` when the list was already seeded.
    pub fn seed(&mut self) -> ContactResult<ContactScript> {
        let snapshot = self
            .reconciler
            .current_snapshot()
            .append_sections(ContactSection::ALL)?
            .append_items(seed_items(SEED_PRIMARY), &ContactSection::Primary)?
            .append_items(seed_items(SEED_SECONDARY), &ContactSection::Secondary)?;
        let script = self.reconciler.commit(snapshot)?;
        info!(
            "event=contacts_seed module=contacts status=ok contacts={}",
            self.reconciler.current_snapshot().number_of_items()
        );
        Ok(script)
    }

    pub fn reconciler(&self) -> &Reconciler<ContactSection, ContactId, Contact> {
        &self.reconciler
    }

    pub fn snapshot(&self) -> &ContactSnapshot {
        self.reconciler.current_snapshot()
    }

    /// Contact rendered at `position`, if any.
    pub fn contact_at(&self, position: Position) -> Option<&Contact> {
        let id = self.reconciler.identity(position)?;
        self.reconciler.payload(id)
    }

    /// Adds one contact at the end of the chosen section.
    ///
    /// # Errors
    /// - `InvalidName` when the trimmed name is empty.
    /// - `Snapshot(UnknownSection)` when the list was never seeded.
    pub fn add_contact(&mut self, form: AddContactForm) -> ContactResult<(ContactId, ContactScript)> {
        let name = normalize_name(form.name)?;
        let id = new_contact_id();
        let snapshot = self
            .reconciler
            .current_snapshot()
            .append_items([(id, Contact::new(name))], &form.section)?;
        let script = self.reconciler.commit(snapshot)?;
        info!(
            "event=contact_add module=contacts status=ok section={}",
            form.section.as_str()
        );
        Ok((id, script))
    }

    /// Deletes the contact rendered at `position`.
    pub fn delete_at(&mut self, position: Position) -> ContactResult<ContactScript> {
        let id = self.id_at(position)?;
        let snapshot = self.reconciler.current_snapshot().delete_items(&[id])?;
        let script = self.reconciler.commit(snapshot)?;
        info!("event=contact_delete module=contacts status=ok position={position}");
        Ok(script)
    }

    /// Flips the favourite star of the contact at `position` and reloads its row.
    pub fn toggle_favourite_at(&mut self, position: Position) -> ContactResult<ContactScript> {
        let id = self.id_at(position)?;
        let toggled = self
            .contact_at(position)
            .ok_or(ContactServiceError::PositionNotFound(position))?
            .toggled_favourite();
        let is_favourite = toggled.is_favourite;
        let snapshot = self
            .reconciler
            .current_snapshot()
            .update_payload(&id, toggled)?
            .reload_items(&[id])?;
        let script = self.reconciler.commit(snapshot)?;
        info!(
            "event=contact_favourite module=contacts status=ok position={position} favourite={is_favourite}"
        );
        Ok(script)
    }

    /// Current rows grouped by section, mapped through `describe_row`.
    pub fn rows(&self) -> Vec<SectionRows> {
        self.snapshot()
            .sections()
            .iter()
            .map(|section| SectionRows {
                section: section.key,
                header: describe_row(&RowContent::Header {
                    section: section.key,
                }),
                rows: section
                    .items
                    .iter()
                    .map(|item| describe_row(&RowContent::from(&item.payload)))
                    .collect(),
            })
            .collect()
    }

    fn id_at(&self, position: Position) -> ContactResult<ContactId> {
        self.reconciler
            .identity(position)
            .copied()
            .ok_or(ContactServiceError::PositionNotFound(position))
    }
}

fn seed_items(names: &[&str]) -> Vec<(ContactId, Contact)> {
    names
        .iter()
        .map(|name| (new_contact_id(), Contact::new(*name)))
        .collect()
}

fn normalize_name(value: String) -> ContactResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactServiceError::InvalidName);
    }
    Ok(trimmed.to_string())
}
