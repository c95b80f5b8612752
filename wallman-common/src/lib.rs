//! Shared infrastructure for the wallman crates: logging, outbound
//! notifications, asset persistence, password hashing and tokens.

pub mod asset;
pub mod hash;
pub mod jwt;
mod logger;
pub mod notify;

pub use asset::{AssetStore, FsAssetStore};
pub use logger::Logger;
pub use notify::{MemoryNotifier, Notification, Notifier, TracingNotifier};
pub use wallman_error::{WMError, WMResult};
