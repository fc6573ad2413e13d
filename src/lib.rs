//! Profile Bot: a short profile-collection dialog and an archive publish tool.

pub mod bot;
pub mod channels;
pub mod config;
pub mod error;
pub mod profile;
pub mod publish;
pub mod store;
