use super::{Identifier, Payload, Position, SnapshotError, SnapshotResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One item: stable identity plus render payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<I, P> {
    pub id: I,
    pub payload: P,
}

/// One section: stable key plus ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<S, I, P> {
    pub key: S,
    pub items: Vec<Item<I, P>>,
}

/// Wire shape used to validate snapshots on deserialize.
#[doc(hidden)]
#[derive(Deserialize)]
pub struct SnapshotRecord<S, I, P> {
    sections: Vec<Section<S, I, P>>,
}

/// Immutable description of one desired list state.
///
/// Builder operations take `&self` and return a new snapshot, so a caller can
/// keep the old one around for diffing.
///
/// # Invariants
/// - Section keys are unique.
/// - Item identities are unique across all sections.
/// - Every reload mark refers to a present item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SnapshotRecord<S, I, P>",
    bound(
        serialize = "S: Serialize, I: Serialize, P: Serialize",
        deserialize = "S: Identifier + Deserialize<'de>, I: Identifier + Deserialize<'de>, P: Payload + Deserialize<'de>"
    )
)]
pub struct Snapshot<S, I, P> {
    sections: Vec<Section<S, I, P>>,
    /// Reload marks are transient and only live until the next commit.
    #[serde(skip)]
    reloaded: Vec<I>,
}

impl<S, I, P> Default for Snapshot<S, I, P> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            reloaded: Vec::new(),
        }
    }
}

impl<S: Identifier, I: Identifier, P: Payload> TryFrom<SnapshotRecord<S, I, P>>
    for Snapshot<S, I, P>
{
    type Error = SnapshotError;

    fn try_from(value: SnapshotRecord<S, I, P>) -> Result<Self, Self::Error> {
        Self::from_sections(value.sections)
    }
}

impl<S: Identifier, I: Identifier, P: Payload> Snapshot<S, I, P> {
    /// Creates an empty snapshot with zero sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from prepared sections, rejecting duplicate keys.
    pub fn from_sections(sections: Vec<Section<S, I, P>>) -> SnapshotResult<Self> {
        let snapshot = Self {
            sections,
            reloaded: Vec::new(),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks every snapshot invariant.
    ///
    /// Builder operations keep these by construction; commit re-checks them
    /// before any state is replaced.
    pub fn validate(&self) -> SnapshotResult<()> {
        let mut section_keys = HashSet::with_capacity(self.sections.len());
        let mut item_ids = HashSet::with_capacity(self.number_of_items());
        for section in &self.sections {
            if !section_keys.insert(&section.key) {
                return Err(SnapshotError::duplicate_section(&section.key));
            }
            for item in &section.items {
                if !item_ids.insert(&item.id) {
                    return Err(SnapshotError::duplicate_item(&item.id));
                }
            }
        }
        for id in &self.reloaded {
            if !item_ids.contains(id) {
                return Err(SnapshotError::unknown_item(id));
            }
        }
        Ok(())
    }

    pub fn sections(&self) -> &[Section<S, I, P>] {
        &self.sections
    }

    pub fn section_keys(&self) -> Vec<S> {
        self.sections.iter().map(|section| section.key.clone()).collect()
    }

    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn number_of_items(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }

    pub fn contains_section(&self, key: &S) -> bool {
        self.section_index(key).is_some()
    }

    pub fn contains_item(&self, id: &I) -> bool {
        self.position_of(id).is_some()
    }

    /// Returns identities of one section in display order.
    pub fn item_identities(&self, key: &S) -> SnapshotResult<Vec<I>> {
        let index = self
            .section_index(key)
            .ok_or_else(|| SnapshotError::unknown_section(key))?;
        Ok(self.sections[index]
            .items
            .iter()
            .map(|item| item.id.clone())
            .collect())
    }

    /// Returns every identity, section by section.
    pub fn all_item_identities(&self) -> Vec<I> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter().map(|item| item.id.clone()))
            .collect()
    }

    pub fn section_of(&self, id: &I) -> Option<&S> {
        self.position_of(id)
            .map(|position| &self.sections[position.section].key)
    }

    pub fn payload(&self, id: &I) -> Option<&P> {
        self.item(id).map(|item| &item.payload)
    }

    /// Linear position scan. Committed snapshots get O(1) lookups through the
    /// reconciler index instead.
    pub fn position_of(&self, id: &I) -> Option<Position> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(section_index, section)| {
                section
                    .items
                    .iter()
                    .position(|item| &item.id == id)
                    .map(|row| Position::new(section_index, row))
            })
    }

    /// Items marked for forced re-render on the next commit.
    pub fn reloaded_items(&self) -> &[I] {
        &self.reloaded
    }

    pub fn is_reloaded(&self, id: &I) -> bool {
        self.reloaded.contains(id)
    }

    /// Appends section keys after the existing sections.
    ///
    /// # Errors
    /// - `DuplicateSection` when a key is present or repeated in `keys`.
    pub fn append_sections(&self, keys: impl IntoIterator<Item = S>) -> SnapshotResult<Self> {
        let mut next = self.clone();
        for key in keys {
            if next.contains_section(&key) {
                return Err(SnapshotError::duplicate_section(&key));
            }
            next.sections.push(Section {
                key,
                items: Vec::new(),
            });
        }
        Ok(next)
    }

    /// Removes sections together with their items.
    ///
    /// # Errors
    /// - `UnknownSection` when any key is absent.
    pub fn delete_sections(&self, keys: &[S]) -> SnapshotResult<Self> {
        let mut next = self.clone();
        for key in keys {
            let index = next
                .section_index(key)
                .ok_or_else(|| SnapshotError::unknown_section(key))?;
            let removed = next.sections.remove(index);
            next.reloaded
                .retain(|id| !removed.items.iter().any(|item| &item.id == id));
        }
        Ok(next)
    }

    /// Appends items to the end of one section.
    ///
    /// # Errors
    /// - `UnknownSection` when `to_section` is absent.
    /// - `DuplicateItem` when an identity is present anywhere or repeated in
    ///   `items`.
    pub fn append_items(
        &self,
        items: impl IntoIterator<Item = (I, P)>,
        to_section: &S,
    ) -> SnapshotResult<Self> {
        let index = self
            .section_index(to_section)
            .ok_or_else(|| SnapshotError::unknown_section(to_section))?;
        let mut next = self.clone();
        for (id, payload) in items {
            if next.contains_item(&id) {
                return Err(SnapshotError::duplicate_item(&id));
            }
            next.sections[index].items.push(Item { id, payload });
        }
        Ok(next)
    }

    /// Removes items from wherever they occur.
    ///
    /// # Errors
    /// - `UnknownItem` when an identity is absent, including a repeat within
    ///   `ids` of an already removed identity.
    pub fn delete_items(&self, ids: &[I]) -> SnapshotResult<Self> {
        let mut next = self.clone();
        for id in ids {
            next.take_item(id)?;
            next.reloaded.retain(|marked| marked != id);
        }
        Ok(next)
    }

    /// Marks items for re-render without changing order.
    ///
    /// # Errors
    /// - `UnknownItem` when an identity is absent.
    pub fn reload_items(&self, ids: &[I]) -> SnapshotResult<Self> {
        let mut next = self.clone();
        for id in ids {
            if !next.contains_item(id) {
                return Err(SnapshotError::unknown_item(id));
            }
            if !next.reloaded.contains(id) {
                next.reloaded.push(id.clone());
            }
        }
        Ok(next)
    }

    /// Replaces the payload of a present item in place.
    ///
    /// Does not mark a reload; pair with `reload_items` under the explicit
    /// reload policy.
    pub fn update_payload(&self, id: &I, payload: P) -> SnapshotResult<Self> {
        let position = self
            .position_of(id)
            .ok_or_else(|| SnapshotError::unknown_item(id))?;
        let mut next = self.clone();
        next.sections[position.section].items[position.row].payload = payload;
        Ok(next)
    }

    /// Relocates one item and keeps its payload.
    ///
    /// `before = None` appends to the end of `to_section`. The anchor must
    /// live in `to_section` and differ from the moved item.
    ///
    /// # Errors
    /// - `UnknownItem` when the item or the anchor is absent.
    /// - `UnknownSection` when `to_section` is absent.
    pub fn move_item(&self, id: &I, to_section: &S, before: Option<&I>) -> SnapshotResult<Self> {
        let target = self
            .section_index(to_section)
            .ok_or_else(|| SnapshotError::unknown_section(to_section))?;
        let mut next = self.clone();
        let item = next.take_item(id)?;
        let row = match before {
            None => next.sections[target].items.len(),
            Some(anchor) => next.sections[target]
                .items
                .iter()
                .position(|candidate| &candidate.id == anchor)
                .ok_or_else(|| SnapshotError::unknown_item(anchor))?,
        };
        next.sections[target].items.insert(row, item);
        Ok(next)
    }

    #[cfg(test)]
    pub(crate) fn from_sections_unchecked(sections: Vec<Section<S, I, P>>) -> Self {
        Self {
            sections,
            reloaded: Vec::new(),
        }
    }

    pub(crate) fn without_reload_marks(mut self) -> Self {
        self.reloaded.clear();
        self
    }

    fn section_index(&self, key: &S) -> Option<usize> {
        self.sections.iter().position(|section| &section.key == key)
    }

    fn item(&self, id: &I) -> Option<&Item<I, P>> {
        self.position_of(id)
            .map(|position| &self.sections[position.section].items[position.row])
    }

    fn take_item(&mut self, id: &I) -> SnapshotResult<Item<I, P>> {
        let position = self
            .position_of(id)
            .ok_or_else(|| SnapshotError::unknown_item(id))?;
        Ok(self.sections[position.section].items.remove(position.row))
    }
}
