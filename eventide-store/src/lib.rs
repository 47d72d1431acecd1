pub mod app_config;
pub mod database;
mod rows;
pub mod enrollment_repo;
pub mod ticket_repo;
pub mod room_repo;
pub mod booking_repo;
pub mod hotel_repo;
pub mod payment_repo;

pub use database::{DbClient, Repositories};
pub use enrollment_repo::PgEnrollmentRepository;
pub use ticket_repo::PgTicketRepository;
pub use room_repo::PgRoomRepository;
pub use booking_repo::PgBookingRepository;
pub use hotel_repo::PgHotelRepository;
pub use payment_repo::PgPaymentRepository;

use eventide_core::RepositoryError;

pub(crate) fn db_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::storage(err)
}
