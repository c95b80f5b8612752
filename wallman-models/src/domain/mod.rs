mod account;
mod application;
mod auth;
mod category;
mod common;
mod control;
mod moderation;
pub mod prelude;
