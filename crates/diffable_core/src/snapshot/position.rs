use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Zero-based `(section, row)` coordinate of one item in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub section: usize,
    pub row: usize,
}

impl Position {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.section, self.row)
    }
}
