use std::sync::Arc;
use tracing::{debug, info};

use eventide_shared::models::{Booking, BookingUpsert, BookingWithRoom, NewBooking};

use crate::capacity::CapacityChecker;
use crate::eligibility::EligibilityChecker;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::BookingRepository;

/// Orchestrates room bookings for enrolled users.
#[derive(Clone)]
pub struct BookingService {
    eligibility: EligibilityChecker,
    capacity: CapacityChecker,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(
        eligibility: EligibilityChecker,
        capacity: CapacityChecker,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            eligibility,
            capacity,
            bookings,
        }
    }

    /// Book `room_id` for a user who holds no booking yet.
    pub async fn book_room(&self, user_id: i32, room_id: Option<i32>) -> ServiceResult<Booking> {
        let room_id = validate_room_id(room_id)?;

        self.eligibility.check_enrollment_ticket(user_id).await?;

        // One booking per user; moving rooms goes through change_booking_room.
        if self.bookings.find_by_user_id(user_id).await?.is_some() {
            debug!(user_id, room_id, "User already holds a booking");
            return Err(ServiceError::CannotBook);
        }

        self.capacity.check_valid_booking(room_id).await?;

        let booking = self.bookings.create(NewBooking { room_id, user_id }).await?;
        info!(user_id, room_id, booking_id = booking.id, "Room booked");

        Ok(booking)
    }

    pub async fn get_booking(&self, user_id: i32) -> ServiceResult<BookingWithRoom> {
        self.bookings
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("booking for user {}", user_id)))
    }

    /// Move the user's existing booking to `room_id`.
    ///
    /// Eligibility is not re-checked: holding a booking implies it passed once.
    pub async fn change_booking_room(
        &self,
        user_id: i32,
        room_id: Option<i32>,
    ) -> ServiceResult<Booking> {
        let room_id = validate_room_id(room_id)?;

        self.capacity.check_valid_booking(room_id).await?;

        let existing = match self.bookings.find_by_user_id(user_id).await? {
            Some(existing) => existing,
            None => {
                debug!(user_id, room_id, "No booking to change");
                return Err(ServiceError::CannotBook);
            }
        };

        let booking = self
            .bookings
            .upsert(BookingUpsert {
                id: existing.booking.id,
                room_id,
                user_id,
            })
            .await?;

        info!(
            user_id,
            booking_id = booking.id,
            from_room = existing.booking.room_id,
            to_room = room_id,
            "Booking moved"
        );

        Ok(booking)
    }
}

fn validate_room_id(room_id: Option<i32>) -> ServiceResult<i32> {
    match room_id {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(ServiceError::BadRequest(format!("invalid roomId {}", id))),
        None => Err(ServiceError::BadRequest("roomId is required".to_string())),
    }
}
