//! Snapshot diff engine.
//!
//! Matches sections by key and items by identity, never by payload. The
//! script is built by replaying it on a working copy of the old layout, so
//! every op addresses the state left by the ops before it:
//! 1. `DeleteItem` for items gone from surviving sections, back to front.
//! 2. `DeleteSection` for gone sections that no surviving item leaves.
//! 3. `InsertSection`/`MoveSection` in final order. Sections on the longest
//!    increasing run of old indices stay put; the rest land right after
//!    their final predecessor.
//! 4. `InsertItem`/`MoveItem` section by section in final order, with the
//!    same longest-run rule per section. Items changing section always move.
//! 5. `DeleteSection` for gone sections that surviving items moved out of.
//! 6. `ReloadItem` for surviving items selected by the reload policy.

use crate::config::ReloadPolicy;
use crate::diff::edit_script::{EditOp, EditScript};
use crate::diff::lis::longest_increasing_subsequence;
use crate::snapshot::{Identifier, Payload, Position, Snapshot};
use std::collections::{HashMap, HashSet};

/// Computes the edit script that turns `old` into `new`.
///
/// `new` is expected to be valid (see `Snapshot::validate`).
pub fn diff_snapshots<S: Identifier, I: Identifier, P: Payload>(
    old: &Snapshot<S, I, P>,
    new: &Snapshot<S, I, P>,
    policy: ReloadPolicy,
) -> EditScript<S, I, P> {
    let old_sections = section_indices(old);
    let new_sections = section_indices(new);
    let old_items = item_positions(old);
    let new_items = item_positions(new);

    let mut layout = Layout::from_snapshot(old);
    let mut ops = Vec::new();

    for (section_index, section) in old.sections().iter().enumerate().rev() {
        if !new_sections.contains_key(&section.key) {
            continue;
        }
        for (row, item) in section.items.iter().enumerate().rev() {
            if !new_items.contains_key(&item.id) {
                let from = Position::new(section_index, row);
                layout.remove_item(from);
                ops.push(EditOp::DeleteItem {
                    id: item.id.clone(),
                    from,
                });
            }
        }
    }

    // Gone sections still holding rows that move elsewhere are deleted last.
    let mut drained_sections = Vec::new();
    for (from, section) in old.sections().iter().enumerate().rev() {
        if new_sections.contains_key(&section.key) {
            continue;
        }
        if section
            .items
            .iter()
            .any(|item| new_items.contains_key(&item.id))
        {
            drained_sections.push(section.key.clone());
        } else {
            layout.remove_section(from);
            ops.push(EditOp::DeleteSection {
                key: section.key.clone(),
                from,
            });
        }
    }

    let common_sections: Vec<(usize, usize)> = new
        .sections()
        .iter()
        .enumerate()
        .filter_map(|(to, section)| old_sections.get(&section.key).map(|&from| (from, to)))
        .collect();
    let stable_sections = stable_targets(&common_sections);

    for (index, section) in new.sections().iter().enumerate() {
        if stable_sections.contains(&index) {
            continue;
        }
        let predecessor = index
            .checked_sub(1)
            .map(|previous| &new.sections()[previous].key);
        match layout.section_index(&section.key) {
            None => {
                let to = layout.section_slot_after(predecessor);
                layout.insert_section(to, section.key.clone());
                ops.push(EditOp::InsertSection {
                    key: section.key.clone(),
                    to,
                });
            }
            Some(from) => {
                let moved = layout.remove_section(from);
                let to = layout.section_slot_after(predecessor);
                layout.restore_section(to, moved);
                ops.push(EditOp::MoveSection {
                    key: section.key.clone(),
                    from,
                    to,
                });
            }
        }
    }

    let mut reloads = Vec::new();
    for (final_section, section) in new.sections().iter().enumerate() {
        let Some(target) = layout.section_index(&section.key) else {
            continue;
        };
        let old_section_index = old_sections.get(&section.key).copied();

        // Rows that stayed in the same section, paired as (old row, new row).
        let common_rows: Vec<(usize, usize)> = section
            .items
            .iter()
            .enumerate()
            .filter_map(|(row, item)| {
                old_items
                    .get(&item.id)
                    .filter(|from| Some(from.section) == old_section_index)
                    .map(|from| (from.row, row))
            })
            .collect();
        let stable_rows = stable_targets(&common_rows);

        for (row, item) in section.items.iter().enumerate() {
            let predecessor = row.checked_sub(1).map(|previous| &section.items[previous].id);
            match old_items.get(&item.id) {
                None => {
                    let to = Position::new(target, layout.row_slot_after(target, predecessor));
                    layout.insert_item(to, item.id.clone());
                    ops.push(EditOp::InsertItem {
                        id: item.id.clone(),
                        to,
                        payload: item.payload.clone(),
                    });
                }
                Some(previous) => {
                    let same_section = Some(previous.section) == old_section_index;
                    if !same_section || !stable_rows.contains(&row) {
                        if let Some(from) = layout.position_of(&item.id) {
                            layout.remove_item(from);
                            let to =
                                Position::new(target, layout.row_slot_after(target, predecessor));
                            layout.insert_item(to, item.id.clone());
                            ops.push(EditOp::MoveItem {
                                id: item.id.clone(),
                                from,
                                to,
                            });
                        }
                    }
                }
            }

            if needs_reload(old, new, &item.id, &item.payload, policy) {
                reloads.push(EditOp::ReloadItem {
                    id: item.id.clone(),
                    at: Position::new(final_section, row),
                    payload: item.payload.clone(),
                });
            }
        }
    }

    let mut drained: Vec<(usize, S)> = drained_sections
        .into_iter()
        .filter_map(|key| layout.section_index(&key).map(|index| (index, key)))
        .collect();
    drained.sort_by(|left, right| right.0.cmp(&left.0));
    for (from, key) in drained {
        layout.remove_section(from);
        ops.push(EditOp::DeleteSection { key, from });
    }

    ops.extend(reloads);
    EditScript::from_ops(ops)
}

/// Identities only, mirroring what a view shows while a script plays out.
struct Layout<S, I> {
    sections: Vec<(S, Vec<I>)>,
}

impl<S: Identifier, I: Identifier> Layout<S, I> {
    fn from_snapshot<P: Payload>(snapshot: &Snapshot<S, I, P>) -> Self {
        Self {
            sections: snapshot
                .sections()
                .iter()
                .map(|section| {
                    (
                        section.key.clone(),
                        section.items.iter().map(|item| item.id.clone()).collect(),
                    )
                })
                .collect(),
        }
    }

    fn section_index(&self, key: &S) -> Option<usize> {
        self.sections.iter().position(|(candidate, _)| candidate == key)
    }

    fn position_of(&self, id: &I) -> Option<Position> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(section, (_, items))| {
                items
                    .iter()
                    .position(|candidate| candidate == id)
                    .map(|row| Position::new(section, row))
            })
    }

    /// Index right after `predecessor`, or the front when there is none.
    fn section_slot_after(&self, predecessor: Option<&S>) -> usize {
        predecessor
            .and_then(|key| self.section_index(key))
            .map_or(0, |index| index + 1)
    }

    fn row_slot_after(&self, section: usize, predecessor: Option<&I>) -> usize {
        let Some(id) = predecessor else {
            return 0;
        };
        self.sections
            .get(section)
            .and_then(|(_, items)| items.iter().position(|candidate| candidate == id))
            .map_or(0, |row| row + 1)
    }

    fn insert_section(&mut self, to: usize, key: S) {
        self.restore_section(to, (key, Vec::new()));
    }

    fn restore_section(&mut self, to: usize, section: (S, Vec<I>)) {
        let to = to.min(self.sections.len());
        self.sections.insert(to, section);
    }

    fn remove_section(&mut self, from: usize) -> (S, Vec<I>) {
        self.sections.remove(from)
    }

    fn insert_item(&mut self, to: Position, id: I) {
        if let Some((_, items)) = self.sections.get_mut(to.section) {
            let row = to.row.min(items.len());
            items.insert(row, id);
        }
    }

    fn remove_item(&mut self, from: Position) {
        if let Some((_, items)) = self.sections.get_mut(from.section) {
            if from.row < items.len() {
                items.remove(from.row);
            }
        }
    }
}

fn needs_reload<S: Identifier, I: Identifier, P: Payload>(
    old: &Snapshot<S, I, P>,
    new: &Snapshot<S, I, P>,
    id: &I,
    payload: &P,
    policy: ReloadPolicy,
) -> bool {
    if new.is_reloaded(id) {
        return true;
    }
    match policy {
        ReloadPolicy::Explicit => false,
        ReloadPolicy::PayloadChanged => old.payload(id) != Some(payload),
    }
}

/// Given `(old index, new index)` pairs in new order, returns the new indices
/// that keep their relative order and need no move.
fn stable_targets(pairs: &[(usize, usize)]) -> HashSet<usize> {
    let old_order: Vec<usize> = pairs.iter().map(|&(from, _)| from).collect();
    longest_increasing_subsequence(&old_order)
        .into_iter()
        .map(|index| pairs[index].1)
        .collect()
}

fn section_indices<S: Identifier, I: Identifier, P: Payload>(
    snapshot: &Snapshot<S, I, P>,
) -> HashMap<S, usize> {
    snapshot
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| (section.key.clone(), index))
        .collect()
}

pub(crate) fn item_positions<S: Identifier, I: Identifier, P: Payload>(
    snapshot: &Snapshot<S, I, P>,
) -> HashMap<I, Position> {
    let mut positions = HashMap::with_capacity(snapshot.number_of_items());
    for (section_index, section) in snapshot.sections().iter().enumerate() {
        for (row, item) in section.items.iter().enumerate() {
            positions.insert(item.id.clone(), Position::new(section_index, row));
        }
    }
    positions
}
