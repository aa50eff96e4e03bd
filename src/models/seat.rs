use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub id: i64,
    pub seat_identifier: String,
    pub seat_class: String,
    pub booking_id: Option<i64>,
}

impl Seat {
    // A seat is booked iff it carries a booking reference.
    pub fn is_booked(&self) -> bool {
        self.booking_id.is_some()
    }
}
