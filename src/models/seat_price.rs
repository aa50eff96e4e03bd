use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::money::Money;

// One row per seat class. The normal price is mandatory; min and max are
// the optional occupancy-band tiers.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SeatPrice {
    pub id: i64,
    pub seat_class: String,
    pub min_price_cents: Option<i64>,
    pub normal_price_cents: i64,
    pub max_price_cents: Option<i64>,
}

impl SeatPrice {
    pub fn min_price(&self) -> Option<Money> {
        self.min_price_cents.map(Money::from_cents)
    }

    pub fn normal_price(&self) -> Money {
        Money::from_cents(self.normal_price_cents)
    }

    pub fn max_price(&self) -> Option<Money> {
        self.max_price_cents.map(Money::from_cents)
    }
}
