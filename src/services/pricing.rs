use crate::error::{AppError, AppResult};
use crate::models::SeatPrice;
use crate::money::Money;
use crate::repositories::{SeatPriceRepository, SeatRepository};

// Occupancy bands, in percent of booked seats per class.
const LOW_OCCUPANCY_BELOW: f64 = 40.0;
const HIGH_OCCUPANCY_FROM: f64 = 60.0;

#[derive(Clone)]
pub struct PricingService {
    seats: SeatRepository,
    seat_prices: SeatPriceRepository,
}

impl PricingService {
    pub fn new(seats: SeatRepository, seat_prices: SeatPriceRepository) -> Self {
        PricingService { seats, seat_prices }
    }

    // Ok(None) means the class has no price row at all ("pricing
    // unavailable"); a class with zero seats is a configuration error.
    pub async fn price_for_class(&self, class: &str) -> AppResult<Option<Money>> {
        let Some(price) = self.seat_prices.get_by_class(class).await? else {
            return Ok(None);
        };

        let counts = self.seats.class_counts(class).await?;
        select_tier(counts.occupied, counts.total, &price).map(Some)
    }
}

// Picks the tier for the current occupancy. Below 40% a configured min
// price applies, from 60% a configured max price; everything else,
// including a missing tier at the boundary, falls through to normal.
pub fn select_tier(occupied: i64, total: i64, price: &SeatPrice) -> AppResult<Money> {
    if total <= 0 {
        return Err(AppError::Configuration(format!(
            "seat class {} has no seats to compute occupancy from",
            price.seat_class
        )));
    }

    let occupancy = occupied as f64 / total as f64 * 100.0;

    if occupancy < LOW_OCCUPANCY_BELOW {
        if let Some(min) = price.min_price() {
            return Ok(min);
        }
    } else if occupancy >= HIGH_OCCUPANCY_FROM {
        if let Some(max) = price.max_price() {
            return Ok(max);
        }
    }

    Ok(price.normal_price())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_row(min: Option<i64>, normal: i64, max: Option<i64>) -> SeatPrice {
        SeatPrice {
            id: 1,
            seat_class: "Economy".to_string(),
            min_price_cents: min,
            normal_price_cents: normal,
            max_price_cents: max,
        }
    }

    #[test]
    fn low_occupancy_selects_min_price() {
        let price = price_row(Some(500), 1000, Some(1500));
        assert_eq!(select_tier(0, 10, &price).unwrap().cents(), 500);
        assert_eq!(select_tier(3, 10, &price).unwrap().cents(), 500);
    }

    #[test]
    fn high_occupancy_selects_max_price() {
        let price = price_row(Some(500), 1000, Some(1500));
        assert_eq!(select_tier(6, 10, &price).unwrap().cents(), 1500);
        assert_eq!(select_tier(10, 10, &price).unwrap().cents(), 1500);
    }

    #[test]
    fn middle_band_selects_normal_price() {
        let price = price_row(Some(500), 1000, Some(1500));
        assert_eq!(select_tier(4, 10, &price).unwrap().cents(), 1000);
        assert_eq!(select_tier(5, 10, &price).unwrap().cents(), 1000);
    }

    #[test]
    fn band_boundaries() {
        let price = price_row(Some(500), 1000, Some(1500));
        // 39.9% is still low, 40% is not; 59.9% is still normal, 60% is high.
        assert_eq!(select_tier(399, 1000, &price).unwrap().cents(), 500);
        assert_eq!(select_tier(400, 1000, &price).unwrap().cents(), 1000);
        assert_eq!(select_tier(599, 1000, &price).unwrap().cents(), 1000);
        assert_eq!(select_tier(600, 1000, &price).unwrap().cents(), 1500);
    }

    #[test]
    fn missing_tiers_fall_through_to_normal() {
        let price = price_row(None, 1000, None);
        assert_eq!(select_tier(0, 10, &price).unwrap().cents(), 1000);
        assert_eq!(select_tier(10, 10, &price).unwrap().cents(), 1000);
    }

    #[test]
    fn zero_seat_class_is_a_configuration_error() {
        let price = price_row(Some(500), 1000, Some(1500));
        assert!(matches!(
            select_tier(0, 0, &price),
            Err(AppError::Configuration(_))
        ));
    }
}
