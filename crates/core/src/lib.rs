//! Shared domain types for the eventra platform.
//!
//! Holds the error taxonomy, role constants, and pure helpers used by both
//! the database layer and the HTTP layer. This crate has no I/O.

pub mod error;
pub mod photos;
pub mod roles;
pub mod types;
