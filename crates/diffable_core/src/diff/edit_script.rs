//! Edit operations emitted by a commit.
//!
//! # Invariants
//! - Ops are in application order. Every coordinate addresses the state left
//!   by the ops before it, so playing a script one op at a time against the
//!   old view yields the new view.
//! - A move removes at `from` first; `to` addresses the state after that
//!   removal.
//! - Reloads come last and address the final state.

use crate::snapshot::Position;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// One edit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp<S, I, P> {
    /// Remove one item.
    DeleteItem { id: I, from: Position },
    /// Remove one section and every row it still holds.
    DeleteSection { key: S, from: usize },
    /// Insert an empty section.
    InsertSection { key: S, to: usize },
    /// Relocate one section with its contents; `to` counts after removal.
    MoveSection { key: S, from: usize, to: usize },
    /// Insert one item.
    InsertItem { id: I, to: Position, payload: P },
    /// Relocate one item, keeping the rendered row; `to` counts after removal.
    MoveItem { id: I, from: Position, to: Position },
    /// Re-render one surviving item at its final position.
    ReloadItem { id: I, at: Position, payload: P },
}

impl<S, I, P> EditOp<S, I, P> {
    /// Item identity touched by this op, if it is an item op.
    pub fn item_id(&self) -> Option<&I> {
        match self {
            Self::DeleteItem { id, .. }
            | Self::InsertItem { id, .. }
            | Self::MoveItem { id, .. }
            | Self::ReloadItem { id, .. } => Some(id),
            Self::DeleteSection { .. } | Self::InsertSection { .. } | Self::MoveSection { .. } => {
                None
            }
        }
    }

    /// Section key touched by this op, if it is a section op.
    pub fn section_key(&self) -> Option<&S> {
        match self {
            Self::DeleteSection { key, .. }
            | Self::InsertSection { key, .. }
            | Self::MoveSection { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Stable snake_case name of the op kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeleteItem { .. } => "delete_item",
            Self::DeleteSection { .. } => "delete_section",
            Self::InsertSection { .. } => "insert_section",
            Self::MoveSection { .. } => "move_section",
            Self::InsertItem { .. } => "insert_item",
            Self::MoveItem { .. } => "move_item",
            Self::ReloadItem { .. } => "reload_item",
        }
    }
}

impl<S: Debug, I: Debug, P> Display for EditOp<S, I, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = self.kind();
        match self {
            Self::DeleteItem { id, from } => write!(f, "{kind} {id:?} from={from}"),
            Self::DeleteSection { key, from } => write!(f, "{kind} {key:?} from={from}"),
            Self::InsertSection { key, to } => write!(f, "{kind} {key:?} to={to}"),
            Self::MoveSection { key, from, to } => {
                write!(f, "{kind} {key:?} from={from} to={to}")
            }
            Self::InsertItem { id, to, .. } => write!(f, "{kind} {id:?} to={to}"),
            Self::MoveItem { id, from, to } => write!(f, "{kind} {id:?} from={from} to={to}"),
            Self::ReloadItem { id, at, .. } => write!(f, "{kind} {id:?} at={at}"),
        }
    }
}

/// Per-kind op counts, used for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSummary {
    pub section_deletes: usize,
    pub section_inserts: usize,
    pub section_moves: usize,
    pub deletes: usize,
    pub inserts: usize,
    pub moves: usize,
    pub reloads: usize,
}

impl EditSummary {
    /// True when the script changes no order or membership.
    pub fn is_structurally_empty(&self) -> bool {
        self.section_deletes == 0
            && self.section_inserts == 0
            && self.section_moves == 0
            && self.deletes == 0
            && self.inserts == 0
            && self.moves == 0
    }
}

/// Ordered edit script produced by one commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditScript<S, I, P> {
    ops: Vec<EditOp<S, I, P>>,
}

impl<S, I, P> Default for EditScript<S, I, P> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

impl<S, I, P> EditScript<S, I, P> {
    pub(crate) fn from_ops(ops: Vec<EditOp<S, I, P>>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[EditOp<S, I, P>] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp<S, I, P>> {
        self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp<S, I, P>> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn summary(&self) -> EditSummary {
        let mut summary = EditSummary::default();
        for op in &self.ops {
            match op {
                EditOp::DeleteItem { .. } => summary.deletes += 1,
                EditOp::DeleteSection { .. } => summary.section_deletes += 1,
                EditOp::InsertSection { .. } => summary.section_inserts += 1,
                EditOp::MoveSection { .. } => summary.section_moves += 1,
                EditOp::InsertItem { .. } => summary.inserts += 1,
                EditOp::MoveItem { .. } => summary.moves += 1,
                EditOp::ReloadItem { .. } => summary.reloads += 1,
            }
        }
        summary
    }

    pub fn inserted_items(&self) -> Vec<&I> {
        self.items_where(|op| matches!(op, EditOp::InsertItem { .. }))
    }

    pub fn deleted_items(&self) -> Vec<&I> {
        self.items_where(|op| matches!(op, EditOp::DeleteItem { .. }))
    }

    pub fn moved_items(&self) -> Vec<&I> {
        self.items_where(|op| matches!(op, EditOp::MoveItem { .. }))
    }

    pub fn reloaded_items(&self) -> Vec<&I> {
        self.items_where(|op| matches!(op, EditOp::ReloadItem { .. }))
    }

    fn items_where(&self, predicate: impl Fn(&EditOp<S, I, P>) -> bool) -> Vec<&I> {
        self.ops
            .iter()
            .filter(|op| predicate(op))
            .filter_map(EditOp::item_id)
            .collect()
    }
}

impl<'a, S, I, P> IntoIterator for &'a EditScript<S, I, P> {
    type Item = &'a EditOp<S, I, P>;
    type IntoIter = std::slice::Iter<'a, EditOp<S, I, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{EditOp, EditScript};
    use crate::snapshot::Position;

    #[test]
    fn summary_counts_each_kind() {
        let script: EditScript<&str, &str, u32> = EditScript::from_ops(vec![
            EditOp::DeleteItem {
                id: "a",
                from: Position::new(0, 0),
            },
            EditOp::InsertSection { key: "s", to: 1 },
            EditOp::InsertItem {
                id: "b",
                to: Position::new(1, 0),
                payload: 1,
            },
            EditOp::ReloadItem {
                id: "c",
                at: Position::new(0, 0),
                payload: 2,
            },
        ]);

        let summary = script.summary();
        assert_eq!(summary.deletes, 1);
        assert_eq!(summary.section_inserts, 1);
        assert_eq!(summary.inserts, 1);
        assert_eq!(summary.reloads, 1);
        assert!(!summary.is_structurally_empty());
        assert_eq!(script.inserted_items(), vec![&"b"]);
        assert_eq!(script.reloaded_items(), vec![&"c"]);
    }

    #[test]
    fn display_is_compact() {
        let op: EditOp<&str, &str, u32> = EditOp::MoveItem {
            id: "x",
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        };
        assert_eq!(op.to_string(), "move_item \"x\" from=0:0 to=0:1");
    }
}
