use diffable_core::{EditOp, EditScript, Reconciler, RenderedList, Snapshot};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

type Rows = Snapshot<u8, u8, u8>;
type Layout = Vec<(u8, Vec<u8>)>;

/// Builds a valid snapshot, dropping repeated section keys and item ids.
fn snapshot_from(raw: &[(u8, Vec<u8>)]) -> Rows {
    let mut seen_sections = HashSet::new();
    let mut seen_items = HashSet::new();
    let mut snapshot = Rows::new();
    for (key, items) in raw {
        if !seen_sections.insert(*key) {
            continue;
        }
        let items: Vec<(u8, u8)> = items
            .iter()
            .filter(|id| seen_items.insert(**id))
            .map(|id| (*id, 0))
            .collect();
        snapshot = snapshot
            .append_sections([*key])
            .unwrap()
            .append_items(items, key)
            .unwrap();
    }
    snapshot
}

fn layout_of(snapshot: &Rows) -> Layout {
    snapshot
        .sections()
        .iter()
        .map(|section| {
            (
                section.key,
                section.items.iter().map(|item| item.id).collect(),
            )
        })
        .collect()
}

/// Plays ops one at a time, checking each op against the rows it finds.
fn play(mut layout: Layout, script: &EditScript<u8, u8, u8>) -> Result<Layout, String> {
    for (step, op) in script.iter().enumerate() {
        let fail = |reason: &str| format!("step {step} `{op}`: {reason}");
        match op {
            EditOp::DeleteItem { id, from } | EditOp::MoveItem { id, from, .. } => {
                let items = &mut layout
                    .get_mut(from.section)
                    .ok_or_else(|| fail("no such section"))?
                    .1;
                if items.get(from.row) != Some(id) {
                    return Err(fail("row holds another item"));
                }
                items.remove(from.row);
            }
            EditOp::DeleteSection { key, from } | EditOp::MoveSection { key, from, .. } => {
                if layout.get(*from).map(|section| section.0) != Some(*key) {
                    return Err(fail("index holds another section"));
                }
                let moved = layout.remove(*from);
                if let EditOp::MoveSection { to, .. } = op {
                    if *to > layout.len() {
                        return Err(fail("target index out of range"));
                    }
                    layout.insert(*to, moved);
                }
            }
            EditOp::InsertSection { key, to } => {
                if *to > layout.len() {
                    return Err(fail("target index out of range"));
                }
                layout.insert(*to, (*key, Vec::new()));
            }
            EditOp::InsertItem { .. } | EditOp::ReloadItem { .. } => {}
        }
        if let EditOp::InsertItem { id, to, .. } | EditOp::MoveItem { id, to, .. } = op {
            let items = &mut layout
                .get_mut(to.section)
                .ok_or_else(|| fail("no such target section"))?
                .1;
            if to.row > items.len() {
                return Err(fail("target row out of range"));
            }
            items.insert(to.row, *id);
        }
        if let EditOp::ReloadItem { id, at, .. } = op {
            let found = layout
                .get(at.section)
                .and_then(|section| section.1.get(at.row));
            if found != Some(id) {
                return Err(fail("reload row holds another item"));
            }
        }
    }
    Ok(layout)
}

fn lis_len(values: &[usize]) -> usize {
    let mut best = vec![1; values.len()];
    for right in 0..values.len() {
        for left in 0..right {
            if values[left] < values[right] {
                best[right] = best[right].max(best[left] + 1);
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}

/// Fewest moves that reorder `old` into `new`: items changing section, plus
/// same-section items off the longest run that kept its order.
fn fewest_moves(old: &Layout, new: &Layout) -> (usize, usize) {
    let old_sections: HashMap<u8, usize> = old
        .iter()
        .enumerate()
        .map(|(index, section)| (section.0, index))
        .collect();
    let old_items: HashMap<u8, (u8, usize)> = old
        .iter()
        .flat_map(|(key, items)| {
            items
                .iter()
                .enumerate()
                .map(move |(row, id)| (*id, (*key, row)))
        })
        .collect();

    let common_sections: Vec<usize> = new
        .iter()
        .filter_map(|section| old_sections.get(&section.0).copied())
        .collect();
    let section_moves = common_sections.len() - lis_len(&common_sections);

    let mut item_moves = 0;
    for (key, items) in new {
        let mut same_section_rows = Vec::new();
        for id in items {
            match old_items.get(id) {
                Some((old_key, row)) if old_key == key => same_section_rows.push(*row),
                Some(_) => item_moves += 1,
                None => {}
            }
        }
        item_moves += same_section_rows.len() - lis_len(&same_section_rows);
    }
    (section_moves, item_moves)
}

fn raw_layout() -> impl Strategy<Value = Vec<(u8, Vec<u8>)>> {
    prop::collection::vec((0u8..5, prop::collection::vec(0u8..14, 0..6)), 0..5)
}

#[test]
fn rows_leaving_a_gone_section_move_before_it_is_deleted() {
    let old = snapshot_from(&[(1, vec![10]), (2, vec![20, 21])]);
    let new = snapshot_from(&[(1, vec![10, 21])]);
    let mut reconciler = Reconciler::default();
    reconciler.commit(old.clone()).unwrap();
    let script = reconciler.commit(new.clone()).unwrap();

    let kinds: Vec<&str> = script.iter().map(EditOp::kind).collect();
    assert_eq!(kinds, vec!["move_item", "delete_section"]);
    assert_eq!(play(layout_of(&old), &script).unwrap(), layout_of(&new));
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn scripts_replay_op_by_op(old_raw in raw_layout(), new_raw in raw_layout()) {
        let old = snapshot_from(&old_raw);
        let new = snapshot_from(&new_raw);
        let mut reconciler = Reconciler::default();
        reconciler.commit(old.clone()).unwrap();
        let script = reconciler.commit(new.clone()).unwrap();

        let played = play(layout_of(&old), &script)
            .unwrap_or_else(|reason| panic!("{reason}\nscript: {script:?}"));
        prop_assert_eq!(played, layout_of(&new));

        let mut rendered = RenderedList::from_snapshot(&old);
        prop_assert!(rendered.apply(&script).is_ok());
        prop_assert!(rendered.matches_order(&new));
    }

    #[test]
    fn recommitting_is_empty(raw in raw_layout()) {
        let snapshot = snapshot_from(&raw);
        let mut reconciler = Reconciler::default();
        reconciler.commit(snapshot.clone()).unwrap();
        prop_assert!(reconciler.commit(snapshot).unwrap().is_empty());
    }

    #[test]
    fn moves_are_minimal(old_raw in raw_layout(), new_raw in raw_layout()) {
        let old = snapshot_from(&old_raw);
        let new = snapshot_from(&new_raw);
        let mut reconciler = Reconciler::default();
        reconciler.commit(old.clone()).unwrap();
        let summary = reconciler.commit(new.clone()).unwrap().summary();

        let (section_moves, item_moves) = fewest_moves(&layout_of(&old), &layout_of(&new));
        prop_assert_eq!(summary.section_moves, section_moves);
        prop_assert_eq!(summary.moves, item_moves);
    }
}
