//! Rendered list state driven by edit scripts.
//!
//! # Responsibility
//! - Mirror what a table view shows while a script plays out op by op.
//! - Detect scripts that do not fit the rendered state.
//!
//! # Invariants
//! - `apply` is all-or-nothing: on error the rendered rows are unchanged.
//! - Each op addresses the rows left by the ops before it.

use crate::diff::{EditOp, EditScript};
use crate::snapshot::{Identifier, Item, Payload, Position, Section, Snapshot};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised when a script does not fit the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// Section index is past the end of the rendered sections.
    SectionOutOfRange(usize),
    /// Row position is past the end of its section.
    RowOutOfRange(Position),
    /// Section at `index` is not the one the op names.
    SectionMismatch { index: usize, expected: String },
    /// Row at `position` is not the item the op names.
    ItemMismatch { position: Position, expected: String },
}

impl Display for ApplyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SectionOutOfRange(index) => write!(f, "section index out of range: {index}"),
            Self::RowOutOfRange(position) => write!(f, "row position out of range: {position}"),
            Self::SectionMismatch { index, expected } => {
                write!(f, "section {index} is not {expected}")
            }
            Self::ItemMismatch { position, expected } => {
                write!(f, "row {position} is not {expected}")
            }
        }
    }
}

impl Error for ApplyError {}

/// Rows currently drawn, grouped by section.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedList<S, I, P> {
    sections: Vec<Section<S, I, P>>,
}

impl<S, I, P> Default for RenderedList<S, I, P> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<S: Identifier, I: Identifier, P: Payload> RenderedList<S, I, P> {
    /// Seeds the rendered rows from a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot<S, I, P>) -> Self {
        Self {
            sections: snapshot.sections().to_vec(),
        }
    }

    pub fn sections(&self) -> &[Section<S, I, P>] {
        &self.sections
    }

    pub fn section_keys(&self) -> Vec<S> {
        self.sections.iter().map(|section| section.key.clone()).collect()
    }

    /// Identities per section, in drawn order.
    pub fn visible_order(&self) -> Vec<(S, Vec<I>)> {
        self.sections
            .iter()
            .map(|section| {
                (
                    section.key.clone(),
                    section.items.iter().map(|item| item.id.clone()).collect(),
                )
            })
            .collect()
    }

    /// True when sections and rows appear in the same order as `snapshot`.
    pub fn matches_order(&self, snapshot: &Snapshot<S, I, P>) -> bool {
        Self::from_snapshot(snapshot).visible_order() == self.visible_order()
    }

    pub fn row(&self, at: Position) -> Option<&Item<I, P>> {
        self.sections
            .get(at.section)
            .and_then(|section| section.items.get(at.row))
    }

    /// Applies one script, op by op, in emitted order.
    ///
    /// # Errors
    /// - Any `ApplyError` when an op does not fit; nothing is applied then.
    pub fn apply(&mut self, script: &EditScript<S, I, P>) -> Result<(), ApplyError> {
        let mut sections = self.sections.clone();
        for op in script {
            apply_op(&mut sections, op)?;
        }
        self.sections = sections;
        Ok(())
    }
}

fn apply_op<S: Identifier, I: Identifier, P: Payload>(
    sections: &mut Vec<Section<S, I, P>>,
    op: &EditOp<S, I, P>,
) -> Result<(), ApplyError> {
    match op {
        EditOp::DeleteItem { id, from } => {
            take_row(sections, *from, id)?;
        }
        EditOp::DeleteSection { key, from } => {
            take_section(sections, *from, key)?;
        }
        EditOp::InsertSection { key, to } => {
            put_section(
                sections,
                *to,
                Section {
                    key: key.clone(),
                    items: Vec::new(),
                },
            )?;
        }
        EditOp::MoveSection { key, from, to } => {
            let section = take_section(sections, *from, key)?;
            put_section(sections, *to, section)?;
        }
        EditOp::InsertItem { id, to, payload } => {
            put_row(
                sections,
                *to,
                Item {
                    id: id.clone(),
                    payload: payload.clone(),
                },
            )?;
        }
        EditOp::MoveItem { id, from, to } => {
            let item = take_row(sections, *from, id)?;
            put_row(sections, *to, item)?;
        }
        EditOp::ReloadItem { id, at, payload } => {
            let item = sections
                .get_mut(at.section)
                .and_then(|section| section.items.get_mut(at.row))
                .ok_or(ApplyError::RowOutOfRange(*at))?;
            if &item.id != id {
                return Err(ApplyError::ItemMismatch {
                    position: *at,
                    expected: format!("{id:?}"),
                });
            }
            item.payload = payload.clone();
        }
    }
    Ok(())
}

fn take_section<S: Identifier, I, P>(
    sections: &mut Vec<Section<S, I, P>>,
    from: usize,
    key: &S,
) -> Result<Section<S, I, P>, ApplyError> {
    match sections.get(from) {
        None => return Err(ApplyError::SectionOutOfRange(from)),
        Some(section) if &section.key != key => {
            return Err(ApplyError::SectionMismatch {
                index: from,
                expected: format!("{key:?}"),
            })
        }
        Some(_) => {}
    }
    Ok(sections.remove(from))
}

fn put_section<S, I, P>(
    sections: &mut Vec<Section<S, I, P>>,
    to: usize,
    section: Section<S, I, P>,
) -> Result<(), ApplyError> {
    if to > sections.len() {
        return Err(ApplyError::SectionOutOfRange(to));
    }
    sections.insert(to, section);
    Ok(())
}

fn take_row<S, I: Identifier, P>(
    sections: &mut [Section<S, I, P>],
    from: Position,
    id: &I,
) -> Result<Item<I, P>, ApplyError> {
    let section = sections
        .get_mut(from.section)
        .ok_or(ApplyError::SectionOutOfRange(from.section))?;
    match section.items.get(from.row) {
        None => return Err(ApplyError::RowOutOfRange(from)),
        Some(item) if &item.id != id => {
            return Err(ApplyError::ItemMismatch {
                position: from,
                expected: format!("{id:?}"),
            })
        }
        Some(_) => {}
    }
    Ok(section.items.remove(from.row))
}

fn put_row<S, I, P>(
    sections: &mut [Section<S, I, P>],
    to: Position,
    item: Item<I, P>,
) -> Result<(), ApplyError> {
    let section = sections
        .get_mut(to.section)
        .ok_or(ApplyError::SectionOutOfRange(to.section))?;
    if to.row > section.items.len() {
        return Err(ApplyError::RowOutOfRange(to));
    }
    section.items.insert(to.row, item);
    Ok(())
}
