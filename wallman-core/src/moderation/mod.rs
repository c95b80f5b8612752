mod desk;
pub mod rules;

pub use desk::{ModerationDesk, ABUSE_SUBJECT, ADMIN_MESSAGE_SUBJECT, BAD_CREDENTIALS, USERNAME_TAKEN};
pub use rules::{ModerationRules, Violations};
