use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::SeatPrice;

#[derive(Clone)]
pub struct SeatPriceRepository {
    pool: PgPool,
}

impl SeatPriceRepository {
    pub fn new(pool: PgPool) -> Self {
        SeatPriceRepository { pool }
    }

    // Ok(None) means the class has no price row; the pricing engine turns
    // that into "pricing unavailable" rather than an error.
    pub async fn get_by_class(&self, class: &str) -> AppResult<Option<SeatPrice>> {
        sqlx::query_as::<_, SeatPrice>(
            "SELECT id, seat_class, min_price_cents, normal_price_cents, max_price_cents
             FROM seat_prices
             WHERE seat_class = $1",
        )
        .bind(class)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(seat_class = class, error = ?e, "failed to fetch seat price");
            AppError::storage("seat_prices.get_by_class", e)
        })
    }
}
