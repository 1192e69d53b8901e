pub mod auth;
pub mod cache;
pub mod cache_keys;
pub mod exports;
pub mod file_storage;

pub use auth::AuthService;
pub use cache::{CacheService, DEFAULT_TTL};
pub use exports::ExportService;
pub use file_storage::FileStorage;
