use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Validation failures raised by builder operations and at commit start.
///
/// Keys are carried in their `Debug` rendering so one error type serves every
/// key type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Section key is already present.
    DuplicateSection(String),
    /// Section key is not present.
    UnknownSection(String),
    /// Item identity is already present somewhere in the snapshot.
    DuplicateItem(String),
    /// Item identity is not present.
    UnknownItem(String),
}

impl SnapshotError {
    pub(crate) fn duplicate_section(key: &impl Debug) -> Self {
        Self::DuplicateSection(format!("{key:?}"))
    }

    pub(crate) fn unknown_section(key: &impl Debug) -> Self {
        Self::UnknownSection(format!("{key:?}"))
    }

    pub(crate) fn duplicate_item(id: &impl Debug) -> Self {
        Self::DuplicateItem(format!("{id:?}"))
    }

    pub(crate) fn unknown_item(id: &impl Debug) -> Self {
        Self::UnknownItem(format!("{id:?}"))
    }
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateSection(key) => write!(f, "section already present: {key}"),
            Self::UnknownSection(key) => write!(f, "section not found: {key}"),
            Self::DuplicateItem(id) => write!(f, "item already present: {id}"),
            Self::UnknownItem(id) => write!(f, "item not found: {id}"),
        }
    }
}

impl Error for SnapshotError {}
