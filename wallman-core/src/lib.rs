//! Domain services of the wall: the application catalog, moderation and
//! account handling, access policy and the projector/screensaver schedule.
//!
//! Every mutating operation takes the acting user explicitly.

pub mod access;
pub mod catalog;
pub mod moderation;
pub mod scheduling;

pub use access::{AccessPolicy, Action};
pub use catalog::{CatalogHook, CatalogStore};
pub use moderation::{ModerationDesk, ModerationRules, Violations};
pub use scheduling::SchedulingConfig;
