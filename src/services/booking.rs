use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::{Booking, Seat};
use crate::money::Money;
use crate::repositories::Repositories;
use crate::services::pricing::PricingService;

#[derive(Clone)]
pub struct BookingService {
    repos: Repositories,
    pricing: PricingService,
}

#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub seats: Vec<Seat>,
}

impl BookingService {
    pub fn new(repos: Repositories, pricing: PricingService) -> Self {
        BookingService { repos, pricing }
    }

    pub async fn is_available(&self, seat_ids: &[i64]) -> AppResult<bool> {
        Ok(self.repos.seats.count_booked(seat_ids).await? == 0)
    }

    // The booking workflow. Every step is a hard gate: the first failure
    // aborts with no partial writes.
    pub async fn book(
        &self,
        seat_ids: &[i64],
        name: &str,
        phone_number: &str,
    ) -> AppResult<BookingDetails> {
        validate_request(seat_ids, name, phone_number)?;

        // Fast-fail pre-check against committed state; the persistence
        // step re-validates under row locks.
        if !self.is_available(seat_ids).await? {
            return Err(AppError::Conflict(
                "one or more of the given seats are not available".to_string(),
            ));
        }

        let mut seats = Vec::with_capacity(seat_ids.len());
        for &id in seat_ids {
            match self.repos.seats.get_by_id(id).await? {
                Some(seat) => seats.push(seat),
                None => {
                    return Err(AppError::NotFound(format!("no seat found with id: {id}")));
                }
            }
        }

        // Price each distinct class once, then multiply by how many of the
        // requested seats fall into it.
        let mut total_amount = Money::zero();
        for (class, count) in count_by_class(&seats) {
            match self.pricing.price_for_class(class).await? {
                Some(price) => {
                    total_amount = price
                        .checked_mul(count)
                        .and_then(|subtotal| total_amount.checked_add(subtotal))
                        .ok_or_else(|| {
                            AppError::Configuration(format!(
                                "total amount for class {class} exceeds the supported range"
                            ))
                        })?;
                }
                None => {
                    return Err(AppError::Configuration(format!(
                        "pricing for class {class} is not available"
                    )));
                }
            }
        }

        let user = self.repos.users.find_or_create(name, phone_number).await?;

        let booking = self
            .repos
            .bookings
            .create_with_seats(user.id, name, total_amount, seat_ids)
            .await?;

        tracing::info!(
            booking_id = booking.id,
            user_id = user.id,
            seats = seat_ids.len(),
            total = %booking.total_amount(),
            "booking created"
        );

        for seat in &mut seats {
            seat.booking_id = Some(booking.id);
        }

        Ok(BookingDetails { booking, seats })
    }
}

fn validate_request(seat_ids: &[i64], name: &str, phone_number: &str) -> AppResult<()> {
    if seat_ids.is_empty() {
        return Err(AppError::Validation("no seat ids provided".to_string()));
    }
    if seat_ids.iter().any(|&id| id <= 0) {
        return Err(AppError::Validation(
            "seat ids must be positive integers".to_string(),
        ));
    }
    let mut sorted = seat_ids.to_vec();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(AppError::Validation(
            "seat ids must not contain duplicates".to_string(),
        ));
    }
    if name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if phone_number.trim().is_empty() {
        return Err(AppError::Validation("phone_number is required".to_string()));
    }
    Ok(())
}

fn count_by_class(seats: &[Seat]) -> BTreeMap<&str, i64> {
    let mut counts = BTreeMap::new();
    for seat in seats {
        *counts.entry(seat.seat_class.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(id: i64, class: &str) -> Seat {
        Seat {
            id,
            seat_identifier: format!("A{id}"),
            seat_class: class.to_string(),
            booking_id: None,
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        assert!(validate_request(&[1, 2, 3], "Alice", "555-0100").is_ok());
    }

    #[test]
    fn rejects_empty_seat_list() {
        assert!(matches!(
            validate_request(&[], "Alice", "555-0100"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_non_positive_ids() {
        for ids in [&[0][..], &[-1][..], &[1, 0][..]] {
            assert!(matches!(
                validate_request(ids, "Alice", "555-0100"),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        assert!(matches!(
            validate_request(&[1, 2, 1], "Alice", "555-0100"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_blank_name_and_phone() {
        assert!(validate_request(&[1], "  ", "555-0100").is_err());
        assert!(validate_request(&[1], "Alice", "").is_err());
    }

    #[test]
    fn counts_seats_per_class() {
        let seats = vec![seat(1, "Economy"), seat(2, "Economy"), seat(3, "Business")];
        let counts = count_by_class(&seats);
        assert_eq!(counts.get("Economy"), Some(&2));
        assert_eq!(counts.get("Business"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
