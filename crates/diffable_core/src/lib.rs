//! Core list-state logic for the diffable contacts app.
//! This crate owns snapshots, reconciliation and the contact use cases.

pub mod config;
pub mod diff;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod snapshot;

pub use config::{ConfigError, ReconcilerConfig, ReloadPolicy};
pub use diff::{diff_snapshots, EditOp, EditScript, EditSummary, Reconciler};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{new_contact_id, Contact, ContactId, ContactSection};
pub use render::list_view::{ApplyError, RenderedList};
pub use render::row::{describe_row, RowContent, RowDescription};
pub use service::contact_service::{
    AddContactForm, ContactListService, ContactResult, ContactScript, ContactServiceError,
    ContactSnapshot, SectionRows,
};
pub use snapshot::{Identifier, Item, Payload, Position, Section, Snapshot, SnapshotError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
