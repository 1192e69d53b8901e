/// Shared application state
use crate::services::{AuthService, CacheService, ExportService, FileStorage};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Constructed once in `main` and cloned per request; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub cache: CacheService,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
    pub exports: Arc<ExportService>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        cache: CacheService,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
        exports: Arc<ExportService>,
    ) -> Self {
        Self {
            pool,
            cache,
            auth_service,
            file_storage,
            exports,
        }
    }
}
