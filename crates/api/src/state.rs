use std::sync::Arc;

use projects_core::country::CountryLookup;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: projects_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Country reference lookup used to enrich project reads.
    pub countries: Arc<CountryLookup>,
}

impl AppState {
    pub fn new(pool: projects_db::DbPool, config: ServerConfig) -> Self {
        let countries = CountryLookup::new(
            config.country_dataset_path.clone(),
            config.default_locale.clone(),
        );
        Self {
            pool,
            config: Arc::new(config),
            countries: Arc::new(countries),
        }
    }
}
