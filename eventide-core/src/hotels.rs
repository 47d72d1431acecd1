use std::sync::Arc;
use tracing::debug;

use eventide_shared::models::{Hotel, HotelWithRooms};

use crate::error::{ServiceError, ServiceResult};
use crate::repository::{EnrollmentRepository, HotelRepository, TicketRepository};

/// Hotel listings, visible only to holders of a paid ticket with hotel.
#[derive(Clone)]
pub struct HotelService {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
    hotels: Arc<dyn HotelRepository>,
}

impl HotelService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
        hotels: Arc<dyn HotelRepository>,
    ) -> Self {
        Self {
            enrollments,
            tickets,
            hotels,
        }
    }

    pub async fn get_hotels(&self, user_id: i32) -> ServiceResult<Vec<Hotel>> {
        self.check_listing_allowed(user_id).await?;

        let hotels = self.hotels.find_hotels().await?;
        if hotels.is_empty() {
            return Err(ServiceError::not_found("hotels"));
        }

        Ok(hotels)
    }

    pub async fn get_hotel_with_rooms(
        &self,
        user_id: i32,
        hotel_id: i32,
    ) -> ServiceResult<HotelWithRooms> {
        self.check_listing_allowed(user_id).await?;

        self.hotels
            .find_with_rooms_by_id(hotel_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("hotel {}", hotel_id)))
    }

    // Unlike booking, a missing enrollment is NotFound here.
    async fn check_listing_allowed(&self, user_id: i32) -> ServiceResult<()> {
        let enrollment = self
            .enrollments
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("enrollment for user {}", user_id)))?;

        match self.tickets.find_by_enrollment_id(enrollment.id).await? {
            Some(ticket) if ticket.grants_hotel() => Ok(()),
            _ => {
                debug!(user_id, "Ticket does not allow hotel listing");
                Err(ServiceError::CannotListHotels)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::repository::{MockEnrollmentRepository, MockHotelRepository, MockTicketRepository};
    use eventide_shared::models::TicketStatus;
    use mockall::predicate::eq;

    const USER_ID: i32 = 19;
    const ENROLLMENT_ID: i32 = 21;
    const HOTEL_ID: i32 = 15;

    fn enrolled() -> MockEnrollmentRepository {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_by_user_id()
            .with(eq(USER_ID))
            .times(1)
            .returning(|user_id| Ok(Some(fixtures::enrollment(ENROLLMENT_ID, user_id))));
        enrollments
    }

    fn holding(ticket: Option<(TicketStatus, bool)>) -> MockTicketRepository {
        let mut tickets = MockTicketRepository::new();
        tickets
            .expect_find_by_enrollment_id()
            .with(eq(ENROLLMENT_ID))
            .times(1)
            .returning(move |id| {
                Ok(ticket.map(|(status, hotel)| fixtures::ticket_with_type(id, status, hotel)))
            });
        tickets
    }

    fn no_hotel_calls() -> MockHotelRepository {
        let mut hotels = MockHotelRepository::new();
        hotels.expect_find_hotels().never();
        hotels.expect_find_with_rooms_by_id().never();
        hotels
    }

    fn service(
        enrollments: MockEnrollmentRepository,
        tickets: MockTicketRepository,
        hotels: MockHotelRepository,
    ) -> HotelService {
        HotelService::new(Arc::new(enrollments), Arc::new(tickets), Arc::new(hotels))
    }

    #[tokio::test]
    async fn test_get_hotels_without_enrollment_is_not_found() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_by_user_id()
            .with(eq(USER_ID))
            .times(1)
            .returning(|_| Ok(None));
        let mut tickets = MockTicketRepository::new();
        tickets.expect_find_by_enrollment_id().never();

        let result = service(enrollments, tickets, no_hotel_calls()).get_hotels(USER_ID).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_hotels_without_ticket_cannot_list() {
        let result = service(enrolled(), holding(None), no_hotel_calls())
            .get_hotels(USER_ID)
            .await;
        assert!(matches!(result, Err(ServiceError::CannotListHotels)));
    }

    #[tokio::test]
    async fn test_get_hotels_with_unpaid_ticket_cannot_list() {
        let result = service(
            enrolled(),
            holding(Some((TicketStatus::Reserved, true))),
            no_hotel_calls(),
        )
        .get_hotels(USER_ID)
        .await;
        assert!(matches!(result, Err(ServiceError::CannotListHotels)));
    }

    #[tokio::test]
    async fn test_get_hotels_empty_is_not_found() {
        let mut hotels = MockHotelRepository::new();
        hotels.expect_find_hotels().times(1).returning(|| Ok(vec![]));

        let result = service(enrolled(), holding(Some((TicketStatus::Paid, true))), hotels)
            .get_hotels(USER_ID)
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_hotels_returns_list() {
        let mut hotels = MockHotelRepository::new();
        hotels
            .expect_find_hotels()
            .times(1)
            .returning(|| Ok(vec![fixtures::hotel(12), fixtures::hotel(65)]));

        let listed = service(enrolled(), holding(Some((TicketStatus::Paid, true))), hotels)
            .get_hotels(USER_ID)
            .await
            .unwrap();
        let ids: Vec<i32> = listed.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![12, 65]);
    }

    #[tokio::test]
    async fn test_get_hotel_with_rooms_missing_is_not_found() {
        let mut hotels = MockHotelRepository::new();
        hotels
            .expect_find_with_rooms_by_id()
            .with(eq(HOTEL_ID))
            .times(1)
            .returning(|_| Ok(None));

        let result = service(enrolled(), holding(Some((TicketStatus::Paid, true))), hotels)
            .get_hotel_with_rooms(USER_ID, HOTEL_ID)
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_hotel_with_rooms_returns_rooms() {
        let mut hotels = MockHotelRepository::new();
        hotels
            .expect_find_with_rooms_by_id()
            .with(eq(HOTEL_ID))
            .times(1)
            .returning(|id| {
                Ok(Some(HotelWithRooms {
                    hotel: fixtures::hotel(id),
                    rooms: vec![fixtures::room(10, 2)],
                }))
            });

        let hotel = service(enrolled(), holding(Some((TicketStatus::Paid, true))), hotels)
            .get_hotel_with_rooms(USER_ID, HOTEL_ID)
            .await
            .unwrap();
        assert_eq!(hotel.hotel.id, HOTEL_ID);
        assert_eq!(hotel.rooms.len(), 1);
        assert_eq!(hotel.rooms[0].id, 10);
    }

    #[tokio::test]
    async fn test_get_hotel_with_rooms_without_hotel_benefit_cannot_list() {
        let result = service(
            enrolled(),
            holding(Some((TicketStatus::Paid, false))),
            no_hotel_calls(),
        )
        .get_hotel_with_rooms(USER_ID, HOTEL_ID)
        .await;
        assert!(matches!(result, Err(ServiceError::CannotListHotels)));
    }
}
