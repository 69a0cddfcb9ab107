use diffable_core::{
    ApplyError, EditOp, EditScript, Position, Reconciler, ReconcilerConfig, ReloadPolicy,
    RenderedList, Snapshot,
};

type Rows = Snapshot<&'static str, &'static str, u32>;
type Layout = &'static [(&'static str, &'static [&'static str])];

fn build(sections: Layout) -> Rows {
    let mut snapshot = Rows::new();
    for (key, items) in sections {
        snapshot = snapshot
            .append_sections([*key])
            .unwrap()
            .append_items(items.iter().map(|id| (*id, 0)), key)
            .unwrap();
    }
    snapshot
}

fn assert_round_trip(old: Layout, new: Layout) {
    let old = build(old);
    let new = build(new);
    let mut reconciler = Reconciler::default();
    reconciler.commit(old.clone()).unwrap();
    let script = reconciler.commit(new.clone()).unwrap();

    let mut rendered = RenderedList::from_snapshot(&old);
    rendered
        .apply(&script)
        .unwrap_or_else(|err| panic!("script {script:?} failed: {err}"));
    assert!(
        rendered.matches_order(&new),
        "rendered {:?} != expected {:?}",
        rendered.visible_order(),
        RenderedList::from_snapshot(&new).visible_order()
    );
}

#[test]
fn round_trip_item_reorders() {
    assert_round_trip(&[("a", &["x", "y"])], &[("a", &["y", "x"])]);
    assert_round_trip(
        &[("a", &["a", "b", "c", "d", "e"])],
        &[("a", &["e", "d", "c", "b", "a"])],
    );
    assert_round_trip(&[("a", &["x", "y", "a", "b"])], &[("a", &["a", "y", "b", "x"])]);
}

#[test]
fn round_trip_inserts_and_deletes() {
    assert_round_trip(&[("a", &["x"])], &[("a", &["x"]), ("b", &["z"])]);
    assert_round_trip(&[("a", &["x", "y", "z"])], &[("a", &["w", "y", "v"])]);
    assert_round_trip(&[("a", &["x", "y"]), ("b", &[])], &[("a", &[]), ("b", &[])]);
}

#[test]
fn round_trip_section_changes() {
    assert_round_trip(
        &[("a", &["x"]), ("b", &["y"]), ("c", &["z"])],
        &[("c", &["z"]), ("a", &["x"]), ("b", &["y"])],
    );
    assert_round_trip(
        &[("a", &["x", "y"]), ("b", &["z"])],
        &[("c", &["y"]), ("a", &["z", "w"])],
    );
    assert_round_trip(
        &[("a", &["x"]), ("b", &["y", "z"])],
        &[("b", &["x", "z"]), ("d", &["y"])],
    );
}

#[test]
fn round_trip_mixed_moves_across_moved_sections() {
    assert_round_trip(
        &[("a", &["a1", "a2", "a3"]), ("b", &["b1", "b2"]), ("c", &["c1"])],
        &[
            ("c", &["a2", "c1"]),
            ("b", &["b2", "a1", "b1"]),
            ("a", &["a3", "n1"]),
        ],
    );
}

#[test]
fn round_trip_to_and_from_empty() {
    assert_round_trip(&[], &[("a", &["x", "y"]), ("b", &["z"])]);
    assert_round_trip(&[("a", &["x", "y"]), ("b", &["z"])], &[]);
}

#[test]
fn reload_updates_rendered_payload() {
    let mut reconciler =
        Reconciler::new(ReconcilerConfig::with_reload_policy(ReloadPolicy::Explicit));
    let old = build(&[("a", &["x", "y"])]);
    reconciler.commit(old.clone()).unwrap();
    let next = old
        .update_payload(&"y", 3)
        .unwrap()
        .reload_items(&["y"])
        .unwrap();
    let script = reconciler.commit(next).unwrap();

    let mut rendered = RenderedList::from_snapshot(&old);
    rendered.apply(&script).unwrap();
    assert_eq!(rendered.row(Position::new(0, 1)).unwrap().payload, 3);
}

#[test]
fn script_that_does_not_fit_is_rejected() {
    let script: EditScript<String, String, u32> = serde_json::from_value(serde_json::json!({
        "ops": [
            { "op": "insert_item", "id": "x", "to": { "section": 3, "row": 0 }, "payload": 1 }
        ]
    }))
    .unwrap();
    assert!(matches!(script.ops()[0], EditOp::InsertItem { .. }));

    let empty = Snapshot::<String, String, u32>::new()
        .append_sections(["a".to_string()])
        .unwrap();
    let mut rendered = RenderedList::from_snapshot(&empty);
    let err = rendered.apply(&script).unwrap_err();
    assert_eq!(err, ApplyError::SectionOutOfRange(3));
    assert!(rendered.matches_order(&empty));
}
