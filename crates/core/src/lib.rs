//! Fixtrack domain core.
//!
//! Pure domain types and policy helpers shared by the database layer, the
//! threshold monitor, and the API server. This crate performs no I/O.

pub mod error;
pub mod fixture;
pub mod issue;
pub mod recipients;
pub mod roles;
pub mod types;
