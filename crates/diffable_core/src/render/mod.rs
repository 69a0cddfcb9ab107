//! Presentation-side helpers built on edit scripts.
//!
//! # Responsibility
//! - Map row content variants to render descriptions without view dispatch.
//! - Apply edit scripts to a rendered list the way a table view would.

pub mod list_view;
pub mod row;
