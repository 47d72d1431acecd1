pub mod error;
pub mod repository;
pub mod eligibility;
pub mod capacity;
pub mod booking;
pub mod hotels;
pub mod tickets;
pub mod payments;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{RepositoryError, RepositoryResult, ServiceError, ServiceResult};
pub use eligibility::EligibilityChecker;
pub use capacity::CapacityChecker;
pub use booking::BookingService;
pub use hotels::HotelService;
pub use tickets::TicketService;
pub use payments::PaymentService;
