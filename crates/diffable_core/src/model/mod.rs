//! Domain model for the contacts list.
//!
//! # Responsibility
//! - Define the contact payload and the section keys it is grouped under.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`, independent of its
//!   display name.

pub mod contact;
