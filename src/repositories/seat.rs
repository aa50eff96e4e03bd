use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::Seat;

#[derive(Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

// Occupancy counts for one seat class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassCounts {
    pub occupied: i64,
    pub total: i64,
}

impl SeatRepository {
    pub fn new(pool: PgPool) -> Self {
        SeatRepository { pool }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>(
            "SELECT id, seat_identifier, seat_class, booking_id
             FROM seats
             ORDER BY seat_class ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "failed to list seats");
            AppError::storage("seats.list_all", e)
        })
    }

    // Ok(None) means "no such seat", distinct from a storage failure.
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Seat>> {
        sqlx::query_as::<_, Seat>(
            "SELECT id, seat_identifier, seat_class, booking_id
             FROM seats
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(seat_id = id, error = ?e, "failed to fetch seat");
            AppError::storage("seats.get_by_id", e)
        })
    }

    // COUNT(booking_id) only counts non-null references, which is exactly
    // the occupied-seat count.
    pub async fn class_counts(&self, class: &str) -> AppResult<ClassCounts> {
        let (occupied, total) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(booking_id), COUNT(*)
             FROM seats
             WHERE seat_class = $1",
        )
        .bind(class)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(seat_class = class, error = ?e, "failed to count seats");
            AppError::storage("seats.class_counts", e)
        })?;

        Ok(ClassCounts { occupied, total })
    }

    // How many of the given seats already carry a booking reference.
    pub async fn count_booked(&self, ids: &[i64]) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)
             FROM seats
             WHERE id = ANY($1) AND booking_id IS NOT NULL",
        )
        .bind(ids)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(seat_ids = ?ids, error = ?e, "failed to check seat availability");
            AppError::storage("seats.count_booked", e)
        })
    }
}
