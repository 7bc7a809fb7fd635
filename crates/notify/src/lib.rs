//! Fixtrack threshold notification engine.
//!
//! This crate provides the building blocks of the contact-threshold
//! monitor:
//!
//! - [`seams`]: the collaborator traits the engine is written against
//!   (fixture source, notification log, recipient directory, probe
//!   inventory, notifier).
//! - [`ThresholdMonitor`]: the policy engine. Candidate scanning,
//!   idempotency/cooldown cutoff, recipient composition with engineer
//!   escalation, dispatch throttling, and run accounting.
//! - [`PgStore`]: Postgres-backed implementations of the read/log seams.
//! - [`SmtpNotifier`]: email delivery via `lettre`.

pub mod email;
pub mod engine;
pub mod seams;
pub mod store;

pub use email::{EmailConfig, SmtpNotifier};
pub use engine::{MonitorConfig, MonitorError, RunSummary, ThresholdMonitor};
pub use store::PgStore;
