use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::seat::Seat;
use crate::money::Money;

// Immutable once created: the total is the pricing snapshot taken at
// booking time, independent of later price changes.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub total_amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

#[derive(Debug, Clone)]
pub struct BookingWithSeats {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub total_amount_cents: i64,
    pub seats: Vec<Seat>,
}

impl BookingWithSeats {
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}
