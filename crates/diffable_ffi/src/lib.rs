//! Flutter-facing bindings for the diffable contacts app.

pub mod api;
