//! Use-case services for the presentation layer.
//!
//! # Responsibility
//! - Turn UI intents (add, delete, favourite) into snapshot edits and commits.
//! - Keep UI/FFI layers decoupled from snapshot building details.

pub mod contact_service;
