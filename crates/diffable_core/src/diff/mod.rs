//! Snapshot reconciliation.
//!
//! # Responsibility
//! - Compute minimal edit scripts between two snapshots.
//! - Hold the committed snapshot and answer position/identity lookups.
//!
//! # Invariants
//! - Items match across snapshots by identity, never by payload.
//! - A commit either replaces the held snapshot wholesale or leaves it
//!   untouched.

mod edit_script;
mod engine;
mod lis;
mod reconciler;

pub use edit_script::{EditOp, EditScript, EditSummary};
pub use engine::diff_snapshots;
pub use reconciler::Reconciler;
