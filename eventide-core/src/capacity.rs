use std::sync::Arc;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::repository::{BookingRepository, RoomRepository};

/// Read-time check that a room still has a free slot.
///
/// Two concurrent callers can both pass this check; the store write is what
/// finally guards capacity.
#[derive(Clone)]
pub struct CapacityChecker {
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl CapacityChecker {
    pub fn new(rooms: Arc<dyn RoomRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { rooms, bookings }
    }

    pub async fn check_valid_booking(&self, room_id: i32) -> ServiceResult<()> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("room {}", room_id)))?;

        let occupied = self.bookings.find_by_room_id(room_id).await?.len();

        if !has_free_slot(occupied, room.capacity) {
            debug!(room_id, occupied, capacity = room.capacity, "Room is full");
            return Err(ServiceError::CannotBook);
        }

        Ok(())
    }
}

/// A room accepts another booking while `occupied < capacity`.
pub fn has_free_slot(occupied: usize, capacity: i32) -> bool {
    match usize::try_from(capacity) {
        Ok(capacity) => occupied < capacity,
        Err(_) => false,
    }
}
