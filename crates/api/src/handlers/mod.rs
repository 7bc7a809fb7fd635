//! HTTP request handlers, one module per resource.

pub mod fixture;
pub mod monitor;
pub mod plant;
pub mod probe;
pub mod user;
