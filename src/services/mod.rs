pub mod booking;
pub mod dataset;
pub mod pricing;

pub use booking::BookingService;
pub use dataset::DatasetService;
pub use pricing::PricingService;
