//! Stateless repositories. Every call takes the connection or transaction
//! it should run on, so callers decide the transaction boundary.

pub mod account;
pub mod application;
pub mod application_log;
pub mod category;
pub mod control;

pub use account::AccountRepository;
pub use application::ApplicationRepository;
pub use application_log::ApplicationLogRepository;
pub use category::CategoryRepository;
pub use control::{ProjectorControlRepository, ScreensaverControlRepository};
