use sqlx::{PgPool, Row};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::{BookingWithSeats, Seat, User, UserWithBookings};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        UserRepository { pool }
    }

    pub async fn get_by_phone_number(&self, phone_number: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, phone_number, email
             FROM users
             WHERE phone_number = $1",
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(phone_number, error = ?e, "failed to fetch user");
            AppError::storage("users.get_by_phone_number", e)
        })
    }

    // Insert-or-fetch keyed on the unique phone number. A concurrent insert
    // of the same number makes the INSERT return nothing, and the follow-up
    // select picks up the winner's row.
    pub async fn find_or_create(&self, name: &str, phone_number: &str) -> AppResult<User> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, phone_number)
             VALUES ($1, $2)
             ON CONFLICT (phone_number) DO NOTHING
             RETURNING id, name, phone_number, email",
        )
        .bind(name)
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(phone_number, error = ?e, "failed to create user");
            AppError::storage("users.find_or_create", e)
        })?;

        if let Some(user) = inserted {
            return Ok(user);
        }

        self.get_by_phone_number(phone_number)
            .await?
            .ok_or_else(|| AppError::storage("users.find_or_create", sqlx::Error::RowNotFound))
    }

    // Looks a user up by phone number or email and loads their bookings
    // and each booking's seats in one round trip.
    pub async fn get_by_identifier(&self, identifier: &str) -> AppResult<Option<UserWithBookings>> {
        let rows = sqlx::query(
            r#"
            SELECT u.id AS user_id, u.name AS user_name, u.phone_number, u.email,
                   b.id AS booking_id, b.name AS booking_name, b.total_amount_cents,
                   s.id AS seat_id, s.seat_identifier, s.seat_class
            FROM users u
            LEFT JOIN bookings b ON b.user_id = u.id
            LEFT JOIN seats s ON s.booking_id = b.id
            WHERE u.id = (
                SELECT id FROM users
                WHERE phone_number = $1 OR email = $1
                ORDER BY id
                LIMIT 1
            )
            ORDER BY b.id, s.id
            "#,
        )
        .bind(identifier)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(identifier, error = ?e, "failed to fetch user bookings");
            AppError::storage("users.get_by_identifier", e)
        })?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let mut user = UserWithBookings {
            id: first.get("user_id"),
            name: first.get("user_name"),
            phone_number: first.get("phone_number"),
            email: first.get("email"),
            bookings: Vec::new(),
        };

        let mut bookings: BTreeMap<i64, BookingWithSeats> = BTreeMap::new();
        for row in &rows {
            let Some(booking_id) = row.get::<Option<i64>, _>("booking_id") else {
                continue;
            };
            let booking = bookings.entry(booking_id).or_insert_with(|| BookingWithSeats {
                id: booking_id,
                user_id: user.id,
                name: row.get("booking_name"),
                total_amount_cents: row.get("total_amount_cents"),
                seats: Vec::new(),
            });
            if let Some(seat_id) = row.get::<Option<i64>, _>("seat_id") {
                booking.seats.push(Seat {
                    id: seat_id,
                    seat_identifier: row.get("seat_identifier"),
                    seat_class: row.get("seat_class"),
                    booking_id: Some(booking_id),
                });
            }
        }

        user.bookings = bookings.into_values().collect();
        Ok(Some(user))
    }
}
