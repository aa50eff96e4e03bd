use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::Booking;
use crate::money::Money;

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        BookingRepository { pool }
    }

    // Creates the booking and stamps every seat's booking reference in one
    // transaction. The seats are re-checked under FOR UPDATE row locks, so
    // a concurrent booking of an overlapping seat set loses here with a
    // Conflict instead of silently double-booking.
    pub async fn create_with_seats(
        &self,
        user_id: i64,
        name: &str,
        total_amount: Money,
        seat_ids: &[i64],
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!(user_id, error = ?e, "failed to begin booking transaction");
            AppError::storage("bookings.begin", e)
        })?;

        // Lock in id order so concurrent overlapping requests cannot
        // deadlock each other.
        let locked = sqlx::query_as::<_, (i64, Option<i64>)>(
            "SELECT id, booking_id
             FROM seats
             WHERE id = ANY($1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(seat_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(seat_ids = ?seat_ids, error = ?e, "failed to lock seats");
            AppError::storage("bookings.lock_seats", e)
        })?;

        verify_seats_bookable(seat_ids, &locked)?;

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, name, total_amount_cents)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, name, total_amount_cents, created_at",
        )
        .bind(user_id)
        .bind(name)
        .bind(total_amount.cents())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(user_id, error = ?e, "failed to insert booking");
            AppError::storage("bookings.insert", e)
        })?;

        let stamped = sqlx::query("UPDATE seats SET booking_id = $1 WHERE id = ANY($2)")
            .bind(booking.id)
            .bind(seat_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(booking_id = booking.id, error = ?e, "failed to stamp seats");
                AppError::storage("bookings.stamp_seats", e)
            })?;

        if stamped.rows_affected() != seat_ids.len() as u64 {
            return Err(AppError::storage(
                "bookings.stamp_seats",
                sqlx::Error::RowNotFound,
            ));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!(booking_id = booking.id, error = ?e, "failed to commit booking");
            AppError::storage("bookings.commit", e)
        })?;

        Ok(booking)
    }
}

// Gate on the locked rows: every requested seat must exist and none may
// already carry a booking reference. Failing here aborts the transaction
// before anything is written.
fn verify_seats_bookable(requested: &[i64], locked: &[(i64, Option<i64>)]) -> AppResult<()> {
    if locked.len() != requested.len() {
        return Err(AppError::NotFound(format!(
            "one or more seats not found with ids: {requested:?}"
        )));
    }
    if locked.iter().any(|(_, booking_id)| booking_id.is_some()) {
        return Err(AppError::Conflict(
            "one or more of the given seats are not available".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_free_seats_pass() {
        let locked = vec![(1, None), (2, None), (3, None)];
        assert!(verify_seats_bookable(&[1, 2, 3], &locked).is_ok());
    }

    #[test]
    fn missing_seat_is_not_found() {
        // seat 3 has no row, so the lock returned fewer seats than requested
        let locked = vec![(1, None), (2, None)];
        assert!(matches!(
            verify_seats_bookable(&[1, 2, 3], &locked),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn already_booked_seat_is_a_conflict() {
        // seat 2 was stamped by an earlier booking; a second attempt on any
        // overlapping set must fail with Conflict, never double-book
        let locked = vec![(1, None), (2, Some(7)), (3, None)];
        assert!(matches!(
            verify_seats_bookable(&[1, 2, 3], &locked),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn empty_request_with_no_rows_passes_the_gate() {
        // the orchestrator rejects empty requests before this point
        assert!(verify_seats_bookable(&[], &[]).is_ok());
    }
}
