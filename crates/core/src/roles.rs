//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint seeded in
//! `20260301000002_create_users_table.sql`. The technician and engineer
//! groups are the CC tiers of threshold notifications.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ENGINEER: &str = "engineer";
pub const ROLE_TECHNICIAN: &str = "technician";
