//! Persistence layer for conversation-scoped dialog settings.

pub mod accessor;
pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use accessor::StateAccessor;
pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::SettingsStore;
