//! Immutable sectioned-list snapshots and their builder operations.
//!
//! # Responsibility
//! - Describe one desired list state: ordered sections of ordered items.
//! - Provide pure builder operations that derive a new snapshot from an old one.
//!
//! # Invariants
//! - Section keys are unique within a snapshot.
//! - Item identities are unique across all sections of a snapshot.
//! - Builder operations never mutate their input.

mod builder;
mod error;
mod position;

pub use builder::{Item, Section, Snapshot};
pub use error::{SnapshotError, SnapshotResult};
pub use position::Position;

use std::fmt::Debug;
use std::hash::Hash;

/// Key used to match sections or items across snapshots.
pub trait Identifier: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Identifier for T {}

/// Content attached to one item identity.
pub trait Payload: Clone + PartialEq + Debug {}

impl<T: Clone + PartialEq + Debug> Payload for T {}
