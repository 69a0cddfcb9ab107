//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide contact list and hand edit scripts to the UI shell.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Return values are UTF-8 strings or plain envelopes with stable meaning.
//! - The contact list is never locked twice; a contended call fails with
//!   `busy` instead of blocking.

use diffable_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AddContactForm, ContactListService, ContactScript, ContactSection, Position,
    ReconcilerConfig, RowDescription, SectionRows,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock, TryLockError};

const BUSY_MESSAGE: &str = "contact list is busy";

static CONTACT_LIST: OnceLock<Mutex<ContactListService>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One drawn row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowItem {
    pub title: String,
    pub leading_icon: Option<String>,
    pub trailing_icon: Option<String>,
}

/// One section with its header and rows, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSectionItem {
    /// Stable section id (`primary|secondary`).
    pub section: String,
    pub header: ContactRowItem,
    pub rows: Vec<ContactRowItem>,
}

/// Snapshot of everything the list currently draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowsResponse {
    pub ok: bool,
    pub sections: Vec<ContactSectionItem>,
    pub message: String,
}

/// Action response envelope for contact mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created contact ID, set by `contacts_add` only.
    pub contact_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Edit ops to animate, in application order.
    pub ops: Vec<String>,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>, script: &ContactScript) -> Self {
        Self {
            ok: true,
            contact_id: None,
            message: message.into(),
            ops: script.iter().map(ToString::to_string).collect(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contact_id: None,
            message: message.into(),
            ops: Vec::new(),
        }
    }
}

/// Returns the rows to draw.
///
/// # FFI contract
/// - Sync call, in-memory.
/// - Never panics; `ok=false` with `busy` message when the list is locked.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_rows() -> ContactRowsResponse {
    match try_lock(contact_list()) {
        Some(service) => ContactRowsResponse {
            ok: true,
            sections: service.rows().into_iter().map(to_section_item).collect(),
            message: String::new(),
        },
        None => ContactRowsResponse {
            ok: false,
            sections: Vec::new(),
            message: BUSY_MESSAGE.to_string(),
        },
    }
}

/// Adds one contact at the end of `section` (`primary|secondary`).
///
/// # FFI contract
/// - Sync call, in-memory.
/// - Never panics.
/// - Returns the created contact ID and the edit ops on success.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_add(name: String, section: String) -> ContactActionResponse {
    add_contact(contact_list(), name, &section)
}

/// Deletes the contact drawn at `row` of `section`.
///
/// # FFI contract
/// - Sync call, in-memory.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_delete(section: String, row: u32) -> ContactActionResponse {
    with_position(contact_list(), "contacts_delete", &section, row, |service, at| {
        service.delete_at(at).map_err(|err| err.to_string())
    })
}

/// Flips the favourite star of the contact drawn at `row` of `section`.
///
/// # FFI contract
/// - Sync call, in-memory.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_toggle_favourite(section: String, row: u32) -> ContactActionResponse {
    with_position(
        contact_list(),
        "contacts_toggle_favourite",
        &section,
        row,
        |service, at| service.toggle_favourite_at(at).map_err(|err| err.to_string()),
    )
}

fn contact_list() -> &'static Mutex<ContactListService> {
    CONTACT_LIST.get_or_init(|| Mutex::new(seeded_list(resolve_config())))
}

fn resolve_config() -> ReconcilerConfig {
    ReconcilerConfig::from_env().unwrap_or_else(|err| {
        warn!("event=config_resolve module=ffi status=fallback error={err}");
        ReconcilerConfig::default()
    })
}

fn seeded_list(config: ReconcilerConfig) -> ContactListService {
    ContactListService::seeded(config).unwrap_or_else(|err| {
        warn!("event=contacts_seed module=ffi status=error error={err}");
        ContactListService::new(config)
    })
}

fn try_lock(list: &Mutex<ContactListService>) -> Option<MutexGuard<'_, ContactListService>> {
    match list.try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => {
            warn!("event=contacts_lock module=ffi status=busy");
            None
        }
    }
}

fn add_contact(
    list: &Mutex<ContactListService>,
    name: String,
    section: &str,
) -> ContactActionResponse {
    let Some(key) = ContactSection::parse(section) else {
        return ContactActionResponse::failure(format!(
            "contacts_add failed: unknown section `{}`",
            section.trim()
        ));
    };
    let Some(mut service) = try_lock(list) else {
        return ContactActionResponse::failure(BUSY_MESSAGE);
    };
    match service.add_contact(AddContactForm::new(name, key)) {
        Ok((id, script)) => ContactActionResponse {
            contact_id: Some(id.to_string()),
            ..ContactActionResponse::success("Contact added.", &script)
        },
        Err(err) => ContactActionResponse::failure(format!("contacts_add failed: {err}")),
    }
}

fn with_position(
    list: &Mutex<ContactListService>,
    action: &str,
    section: &str,
    row: u32,
    f: impl FnOnce(&mut ContactListService, Position) -> Result<ContactScript, String>,
) -> ContactActionResponse {
    let Some(key) = ContactSection::parse(section) else {
        return ContactActionResponse::failure(format!(
            "{action} failed: unknown section `{}`",
            section.trim()
        ));
    };
    let Some(mut service) = try_lock(list) else {
        return ContactActionResponse::failure(BUSY_MESSAGE);
    };
    let Some(section_index) = service
        .snapshot()
        .section_keys()
        .iter()
        .position(|candidate| *candidate == key)
    else {
        return ContactActionResponse::failure(format!(
            "{action} failed: section `{}` is not shown",
            key.as_str()
        ));
    };
    let at = Position::new(section_index, row as usize);
    match f(&mut *service, at) {
        Ok(script) => ContactActionResponse::success(format!("{action} ok."), &script),
        Err(err) => ContactActionResponse::failure(format!("{action} failed: {err}")),
    }
}

fn to_section_item(section: SectionRows) -> ContactSectionItem {
    ContactSectionItem {
        section: section.section.as_str().to_string(),
        header: to_row_item(section.header),
        rows: section.rows.into_iter().map(to_row_item).collect(),
    }
}

fn to_row_item(row: RowDescription) -> ContactRowItem {
    ContactRowItem {
        title: row.title,
        leading_icon: row.leading_icon.map(str::to_string),
        trailing_icon: row.trailing_icon.map(str::to_string),
    }
}
