use async_trait::async_trait;
use eventide_shared::models::{
    Booking, BookingUpsert, BookingWithRoom, Enrollment, Hotel, HotelWithRooms, NewBooking,
    NewPayment, NewTicket, Payment, Room, Ticket, TicketType, TicketWithType,
};

use crate::error::RepositoryResult;

/// Repository trait for enrollment lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: i32) -> RepositoryResult<Option<Enrollment>>;

    async fn find_by_id(&self, enrollment_id: i32) -> RepositoryResult<Option<Enrollment>>;
}

/// Repository trait for tickets and ticket types
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// The ticket held by an enrollment, joined with its type.
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> RepositoryResult<Option<TicketWithType>>;

    async fn find_by_id(&self, ticket_id: i32) -> RepositoryResult<Option<Ticket>>;

    async fn find_with_type_by_id(&self, ticket_id: i32)
        -> RepositoryResult<Option<TicketWithType>>;

    async fn find_ticket_types(&self) -> RepositoryResult<Vec<TicketType>>;

    async fn create_ticket(&self, ticket: NewTicket) -> RepositoryResult<TicketWithType>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, room_id: i32) -> RepositoryResult<Option<Room>>;
}

/// Repository trait for booking rows
///
/// Implementations backed by a shared store should refuse writes that would
/// overfill a room (`RepositoryError::RoomFull`) or give a user a second
/// booking (`RepositoryError::DuplicateBooking`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: i32) -> RepositoryResult<Option<BookingWithRoom>>;

    async fn find_by_room_id(&self, room_id: i32) -> RepositoryResult<Vec<Booking>>;

    async fn create(&self, booking: NewBooking) -> RepositoryResult<Booking>;

    /// Write the row keyed by `booking.id`, inserting it if missing.
    async fn upsert(&self, booking: BookingUpsert) -> RepositoryResult<Booking>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn find_hotels(&self) -> RepositoryResult<Vec<Hotel>>;

    async fn find_with_rooms_by_id(&self, hotel_id: i32)
        -> RepositoryResult<Option<HotelWithRooms>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_ticket_id(&self, ticket_id: i32) -> RepositoryResult<Option<Payment>>;

    /// Record the payment and flip its ticket to PAID as one write. Either both
    /// land or neither does.
    async fn create_payment_for_ticket(&self, payment: NewPayment) -> RepositoryResult<Payment>;
}
