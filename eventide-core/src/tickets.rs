use std::sync::Arc;
use tracing::info;

use eventide_shared::models::{NewTicket, TicketStatus, TicketType, TicketWithType};

use crate::error::{ServiceError, ServiceResult};
use crate::repository::{EnrollmentRepository, TicketRepository};

#[derive(Clone)]
pub struct TicketService {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl TicketService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self { enrollments, tickets }
    }

    pub async fn get_ticket_types(&self) -> ServiceResult<Vec<TicketType>> {
        Ok(self.tickets.find_ticket_types().await?)
    }

    pub async fn get_ticket_by_user_id(&self, user_id: i32) -> ServiceResult<TicketWithType> {
        let enrollment_id = self.enrollment_id_for(user_id).await?;

        self.tickets
            .find_by_enrollment_id(enrollment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("ticket for user {}", user_id)))
    }

    /// Reserve a ticket of the given type; it stays RESERVED until paid.
    pub async fn create_ticket(
        &self,
        user_id: i32,
        ticket_type_id: i32,
    ) -> ServiceResult<TicketWithType> {
        let enrollment_id = self.enrollment_id_for(user_id).await?;

        let ticket = self
            .tickets
            .create_ticket(NewTicket {
                ticket_type_id,
                enrollment_id,
                status: TicketStatus::Reserved,
            })
            .await?;

        info!(user_id, ticket_id = ticket.ticket.id, ticket_type_id, "Ticket reserved");
        Ok(ticket)
    }

    async fn enrollment_id_for(&self, user_id: i32) -> ServiceResult<i32> {
        self.enrollments
            .find_by_user_id(user_id)
            .await?
            .map(|enrollment| enrollment.id)
            .ok_or_else(|| ServiceError::not_found(format!("enrollment for user {}", user_id)))
    }
}
