use serde::Deserialize;
use std::env;

// Top-level configuration container, read once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Paths of the CSV files the reset endpoint reloads reference data from.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub seats_csv: String,
    pub seat_prices_csv: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seat_booking=debug,tower_http=debug".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
                pool_size: env::var("DB_POOL_SIZE")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .expect("DB_POOL_SIZE must be a valid number"),
            },
            data: DataConfig {
                seats_csv: env::var("SEATS_CSV")
                    .unwrap_or_else(|_| "./data/seats.csv".to_string()),
                seat_prices_csv: env::var("SEAT_PRICES_CSV")
                    .unwrap_or_else(|_| "./data/seat_prices.csv".to_string()),
            },
        }
    }
}
