//! Pricewatch Backend Library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use database::Database;
use repositories::*;
use std::sync::Arc;

/// Application state containing all repositories
pub struct AppState {
    pub database: Database,
    pub product_repo: Arc<ProductRepository>,
    pub subscription_repo: Arc<SubscriptionRepository>,
}

impl AppState {
    /// Create a new AppState with initialized repositories
    pub fn new(pool: sqlx::PgPool) -> Self {
        let database = Database::new(pool.clone());

        Self {
            database,
            product_repo: Arc::new(ProductRepository::new(pool.clone())),
            subscription_repo: Arc::new(SubscriptionRepository::new(pool)),
        }
    }
}
