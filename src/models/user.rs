use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::booking::BookingWithSeats;

// At least one of phone_number/email is always set (enforced by a CHECK
// constraint in the schema).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

// A user with their bookings and each booking's seats eagerly loaded.
#[derive(Debug, Clone)]
pub struct UserWithBookings {
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub bookings: Vec<BookingWithSeats>,
}
