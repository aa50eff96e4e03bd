use serde::{Deserialize, Serialize};

use crate::config::DataConfig;
use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::money::Money;

// Reloads seat and seat-price reference data from the configured CSV
// files, replacing the existing rows in one transaction.
#[derive(Clone)]
pub struct DatasetService {
    db: Database,
    data: DataConfig,
}

#[derive(Debug, Deserialize)]
struct SeatRecord {
    id: i64,
    seat_identifier: String,
    seat_class: String,
}

// min_price and max_price may be empty; normal_price is mandatory.
#[derive(Debug, Deserialize)]
struct SeatPriceRecord {
    id: i64,
    seat_class: String,
    min_price: String,
    normal_price: String,
    max_price: String,
}

#[derive(Debug, Serialize)]
pub struct ResetSummary {
    pub seats_loaded: usize,
    pub seat_prices_loaded: usize,
}

impl DatasetService {
    pub fn new(db: Database, data: DataConfig) -> Self {
        DatasetService { db, data }
    }

    pub async fn reset(&self) -> AppResult<ResetSummary> {
        let seats = load_seats(&self.data.seats_csv)?;
        let prices = load_seat_prices(&self.data.seat_prices_csv)?;

        let mut tx = self.db.pool.begin().await.map_err(|e| {
            tracing::error!(error = ?e, "failed to begin reset transaction");
            AppError::storage("dataset.begin", e)
        })?;

        // Seats go first: they reference bookings, not the other way round,
        // so dropping them releases every booking stamp in one statement.
        sqlx::query("DELETE FROM seats")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "failed to clear seats");
                AppError::storage("dataset.clear_seats", e)
            })?;
        sqlx::query("DELETE FROM seat_prices")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "failed to clear seat prices");
                AppError::storage("dataset.clear_seat_prices", e)
            })?;

        for seat in &seats {
            sqlx::query(
                "INSERT INTO seats (id, seat_identifier, seat_class, booking_id)
                 VALUES ($1, $2, $3, NULL)",
            )
            .bind(seat.id)
            .bind(&seat.seat_identifier)
            .bind(&seat.seat_class)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(seat_id = seat.id, error = ?e, "failed to insert seat");
                AppError::storage("dataset.insert_seat", e)
            })?;
        }

        for price in &prices {
            sqlx::query(
                "INSERT INTO seat_prices
                 (id, seat_class, min_price_cents, normal_price_cents, max_price_cents)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(price.id)
            .bind(&price.seat_class)
            .bind(price.min_price_cents)
            .bind(price.normal_price_cents)
            .bind(price.max_price_cents)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(price_id = price.id, error = ?e, "failed to insert seat price");
                AppError::storage("dataset.insert_seat_price", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!(error = ?e, "failed to commit reset transaction");
            AppError::storage("dataset.commit", e)
        })?;

        tracing::info!(
            seats = seats.len(),
            seat_prices = prices.len(),
            "reference data reset from CSV"
        );

        Ok(ResetSummary {
            seats_loaded: seats.len(),
            seat_prices_loaded: prices.len(),
        })
    }
}

struct SeatPriceRow {
    id: i64,
    seat_class: String,
    min_price_cents: Option<i64>,
    normal_price_cents: i64,
    max_price_cents: Option<i64>,
}

fn load_seats(path: &str) -> AppResult<Vec<SeatRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        AppError::Configuration(format!("unable to open seats data file {path}: {e}"))
    })?;

    let mut seats = Vec::new();
    for (idx, record) in reader.deserialize::<SeatRecord>().enumerate() {
        let line = idx + 2; // header is line 1
        let seat = record.map_err(|e| {
            AppError::Validation(format!("{path} line {line}: malformed seat record: {e}"))
        })?;
        if seat.seat_identifier.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{path} line {line}: seat_identifier is missing"
            )));
        }
        if seat.seat_class.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{path} line {line}: seat_class is missing"
            )));
        }
        seats.push(seat);
    }
    Ok(seats)
}

fn load_seat_prices(path: &str) -> AppResult<Vec<SeatPriceRow>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        AppError::Configuration(format!("unable to open seat prices data file {path}: {e}"))
    })?;

    let mut prices = Vec::new();
    for (idx, record) in reader.deserialize::<SeatPriceRecord>().enumerate() {
        let line = idx + 2;
        let record = record.map_err(|e| {
            AppError::Validation(format!("{path} line {line}: malformed price record: {e}"))
        })?;
        prices.push(convert_price_record(record).map_err(|msg| {
            AppError::Validation(format!("{path} line {line}: {msg}"))
        })?);
    }
    Ok(prices)
}

fn convert_price_record(record: SeatPriceRecord) -> Result<SeatPriceRow, String> {
    if record.seat_class.trim().is_empty() {
        return Err("seat_class is missing".to_string());
    }

    let normal = required_price("normal_price", &record.normal_price)?;
    let min = optional_price("min_price", &record.min_price)?;
    let max = optional_price("max_price", &record.max_price)?;

    Ok(SeatPriceRow {
        id: record.id,
        seat_class: record.seat_class,
        min_price_cents: min,
        normal_price_cents: normal,
        max_price_cents: max,
    })
}

fn required_price(field: &str, value: &str) -> Result<i64, String> {
    if value.is_empty() {
        return Err(format!("{field} is missing"));
    }
    value
        .parse::<Money>()
        .map(|m| m.cents())
        .map_err(|e| format!("{field}: {e}"))
}

// An empty field means the tier is not configured for this class.
fn optional_price(field: &str, value: &str) -> Result<Option<i64>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    required_price(field, value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_optional_tier_becomes_none() {
        assert_eq!(optional_price("min_price", "").unwrap(), None);
        assert_eq!(optional_price("min_price", "$10.50").unwrap(), Some(1050));
    }

    #[test]
    fn normal_price_is_mandatory() {
        let record = SeatPriceRecord {
            id: 1,
            seat_class: "Economy".to_string(),
            min_price: String::new(),
            normal_price: String::new(),
            max_price: String::new(),
        };
        assert!(convert_price_record(record).is_err());
    }

    #[test]
    fn converts_a_full_record_to_cents() {
        let record = SeatPriceRecord {
            id: 1,
            seat_class: "Business".to_string(),
            min_price: "$40".to_string(),
            normal_price: "$50".to_string(),
            max_price: "$62.5".to_string(),
        };
        let row = convert_price_record(record).unwrap();
        assert_eq!(row.min_price_cents, Some(4000));
        assert_eq!(row.normal_price_cents, 5000);
        assert_eq!(row.max_price_cents, Some(6250));
    }

    #[test]
    fn rejects_undecorated_price_values() {
        assert!(required_price("normal_price", "10").is_err());
        assert!(optional_price("max_price", "-$5").is_err());
    }
}
