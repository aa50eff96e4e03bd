pub mod booking;
pub mod seat;
pub mod seat_price;
pub mod user;

pub use booking::{Booking, BookingWithSeats};
pub use seat::Seat;
pub use seat_price::SeatPrice;
pub use user::{User, UserWithBookings};
