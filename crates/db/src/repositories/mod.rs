//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod fixture_repo;
pub mod notification_log_repo;
pub mod plant_repo;
pub mod probe_repo;
pub mod user_repo;

pub use fixture_repo::FixtureRepo;
pub use notification_log_repo::NotificationLogRepo;
pub use plant_repo::PlantRepo;
pub use probe_repo::ProbeRepo;
pub use user_repo::UserRepo;
