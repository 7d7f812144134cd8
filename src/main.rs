//! Pricewatch Backend Service
//!
//! Main entry point for the Pricewatch price-tracking backend.
//! This service provides:
//! - Background update cycles that re-scrape tracked products
//! - Price history aggregation and persistence
//! - Email notifications for stock, lowest-price and discount alerts

use pricewatch_backend::config::AppConfig;
use pricewatch_backend::database::{run_migrations, Database};
use pricewatch_backend::error::{AppError, AppResult};
use pricewatch_backend::services::{MailClient, ProductTracker, ScrapeClient};
use pricewatch_backend::AppState;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    // Initialize tracing/logging with config
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pricewatch_backend={},sqlx=warn", config.log_level).into()
            }),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║         Pricewatch Backend Service Starting               ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("Poll interval: {}s", config.tracker.poll_interval_secs);
    info!("Discount threshold: {}%", config.tracker.discount_threshold);

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let database = Database::connect(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    // Run migrations
    info!("Running database migrations...");
    run_migrations(database.pool(), None).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // CORE SERVICES INITIALIZATION
    // =========================================================================
    info!("Initializing core services...");

    // Initialize application state with repositories
    let app_state = Arc::new(AppState::new(database.pool().clone()));
    info!("✓ Application state initialized with repositories");

    // Initialize collaborator clients
    let scraper = Arc::new(ScrapeClient::new(&config.scraper));
    info!("✓ Scrape client initialized ({})", config.scraper.endpoint);

    let mailer = Arc::new(MailClient::new(&config.mailer));
    info!("✓ Mail client initialized ({})", config.mailer.endpoint);

    // =========================================================================
    // BACKGROUND TASKS
    // =========================================================================
    info!("Starting background tasks...");

    let tracker = ProductTracker::new(
        app_state.product_repo.clone(),
        app_state.subscription_repo.clone(),
        scraper,
        mailer,
        &config.tracker,
    );

    // Start tracker in background
    let tracker_handle = tokio::spawn(async move {
        tracker.start().await;
    });
    info!(
        "✓ Product tracker background task started ({}s interval)",
        config.tracker.poll_interval_secs
    );

    // =========================================================================
    // READY
    // =========================================================================
    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Pricewatch Backend Service Ready!               ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Press Ctrl+C to shutdown gracefully");

    // =========================================================================
    // SHUTDOWN HANDLING
    // =========================================================================
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down gracefully...");
        }
        _ = tracker_handle => {
            error!("Product tracker task exited unexpectedly");
        }
    }

    // Close the pool explicitly; in-flight queries drain first
    database.close().await;

    info!("Pricewatch backend service shutdown complete");
    Ok(())
}
