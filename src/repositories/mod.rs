pub mod booking;
pub mod seat;
pub mod seat_price;
pub mod user;

pub use booking::BookingRepository;
pub use seat::SeatRepository;
pub use seat_price::SeatPriceRepository;
pub use user::UserRepository;

use sqlx::PgPool;

// Explicitly constructed repository set, passed to the services instead of
// a global storage handle.
#[derive(Clone)]
pub struct Repositories {
    pub seats: SeatRepository,
    pub seat_prices: SeatPriceRepository,
    pub users: UserRepository,
    pub bookings: BookingRepository,
}

impl Repositories {
    pub fn new(pool: PgPool) -> Self {
        Repositories {
            seats: SeatRepository::new(pool.clone()),
            seat_prices: SeatPriceRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
        }
    }
}
