use crate::config::ReconcilerConfig;
use crate::diff::edit_script::EditScript;
use crate::diff::engine::{diff_snapshots, item_positions};
use crate::snapshot::{Identifier, Payload, Position, Snapshot, SnapshotResult};
use log::{debug, warn};
use std::collections::HashMap;

/// Holds the last committed snapshot and its position index.
///
/// `commit` takes `&mut self`, so nothing holding a borrow of the reconciler
/// can commit again while it walks a script.
#[derive(Debug, Clone)]
pub struct Reconciler<S, I, P> {
    config: ReconcilerConfig,
    current: Snapshot<S, I, P>,
    positions: HashMap<I, Position>,
    generation: u64,
}

impl<S: Identifier, I: Identifier, P: Payload> Default for Reconciler<S, I, P> {
    fn default() -> Self {
        Self::new(ReconcilerConfig::default())
    }
}

impl<S: Identifier, I: Identifier, P: Payload> Reconciler<S, I, P> {
    /// Creates a reconciler holding an empty snapshot.
    pub fn new(config: ReconcilerConfig) -> Self {
        Self {
            config,
            current: Snapshot::new(),
            positions: HashMap::new(),
            generation: 0,
        }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Last committed snapshot; the base for building the next one.
    pub fn current_snapshot(&self) -> &Snapshot<S, I, P> {
        &self.current
    }

    /// Number of successful commits so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Diffs `next` against the held snapshot and adopts it.
    ///
    /// Reload marks on `next` become reload ops and are cleared from the
    /// held copy.
    ///
    /// # Errors
    /// - Any `SnapshotError` from `Snapshot::validate`; the held state is
    ///   left untouched.
    pub fn commit(&mut self, next: Snapshot<S, I, P>) -> SnapshotResult<EditScript<S, I, P>> {
        if let Err(err) = next.validate() {
            warn!(
                "event=commit module=reconciler status=rejected generation={} error={}",
                self.generation, err
            );
            return Err(err);
        }

        let script = diff_snapshots(&self.current, &next, self.config.reload_policy);
        let next = next.without_reload_marks();
        let positions = item_positions(&next);

        self.current = next;
        self.positions = positions;
        self.generation += 1;

        let summary = script.summary();
        debug!(
            "event=commit module=reconciler status=ok generation={} sections={} items={} \
             section_inserts={} section_deletes={} section_moves={} inserts={} deletes={} \
             moves={} reloads={}",
            self.generation,
            self.current.number_of_sections(),
            self.current.number_of_items(),
            summary.section_inserts,
            summary.section_deletes,
            summary.section_moves,
            summary.inserts,
            summary.deletes,
            summary.moves,
            summary.reloads
        );
        Ok(script)
    }

    /// Identity rendered at `at`, if any.
    pub fn identity(&self, at: Position) -> Option<&I> {
        self.current
            .sections()
            .get(at.section)
            .and_then(|section| section.items.get(at.row))
            .map(|item| &item.id)
    }

    /// Position of `of` in the committed snapshot, if present.
    pub fn position(&self, of: &I) -> Option<Position> {
        self.positions.get(of).copied()
    }

    /// Payload of `of` in the committed snapshot, if present.
    pub fn payload(&self, of: &I) -> Option<&P> {
        let position = self.position(of)?;
        self.current
            .sections()
            .get(position.section)
            .and_then(|section| section.items.get(position.row))
            .map(|item| &item.payload)
    }
}
