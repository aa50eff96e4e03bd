pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod money;
pub mod repositories;
pub mod services;

use anyhow::Context;
use std::sync::Arc;

// Shared state for the whole application. Repositories and services are
// constructed once here and injected; nothing reaches for a global handle.
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
    pub repos: repositories::Repositories,
    pub pricing: services::PricingService,
    pub booking: services::BookingService,
    pub dataset: services::DatasetService,
}

impl AppState {
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database.url, config.database.pool_size)
            .await
            .context("failed to connect to database")?;

        db.run_migrations()
            .await
            .context("failed to run migrations")?;

        let repos = repositories::Repositories::new(db.pool.clone());
        let pricing =
            services::PricingService::new(repos.seats.clone(), repos.seat_prices.clone());
        let booking = services::BookingService::new(repos.clone(), pricing.clone());
        let dataset = services::DatasetService::new(db.clone(), config.data.clone());

        Ok(Arc::new(Self {
            db,
            config,
            repos,
            pricing,
            booking,
            dataset,
        }))
    }
}
