use std::sync::Arc;
use tracing::{info, warn};

use eventide_shared::models::{CardData, NewPayment, Payment};

use crate::error::{ServiceError, ServiceResult};
use crate::repository::{EnrollmentRepository, PaymentRepository, TicketRepository};

/// Ticket payments. A user may only see or pay for a ticket of their own
/// enrollment.
#[derive(Clone)]
pub struct PaymentService {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            enrollments,
            tickets,
            payments,
        }
    }

    pub async fn get_payment_by_ticket_id(
        &self,
        user_id: i32,
        ticket_id: i32,
    ) -> ServiceResult<Payment> {
        self.check_ticket_ownership(user_id, ticket_id).await?;

        self.payments
            .find_by_ticket_id(ticket_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("payment for ticket {}", ticket_id)))
    }

    /// Record a payment for the ticket's price and mark the ticket PAID in the
    /// same store write.
    pub async fn process_payment(
        &self,
        ticket_id: i32,
        user_id: i32,
        card: &CardData,
    ) -> ServiceResult<Payment> {
        self.check_ticket_ownership(user_id, ticket_id).await?;

        let ticket = self
            .tickets
            .find_with_type_by_id(ticket_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("ticket {}", ticket_id)))?;

        let payment = self
            .payments
            .create_payment_for_ticket(NewPayment {
                ticket_id,
                value: ticket.ticket_type.price,
                card_issuer: card.issuer.clone(),
                card_last_digits: card.last_digits(),
            })
            .await?;

        info!(
            user_id,
            ticket_id,
            payment_id = payment.id,
            value = payment.value,
            "Ticket paid"
        );
        Ok(payment)
    }

    async fn check_ticket_ownership(&self, user_id: i32, ticket_id: i32) -> ServiceResult<()> {
        let ticket = self
            .tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("ticket {}", ticket_id)))?;

        let enrollment = self
            .enrollments
            .find_by_id(ticket.enrollment_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("enrollment {}", ticket.enrollment_id))
            })?;

        if enrollment.user_id != user_id {
            warn!(user_id, ticket_id, "Ticket belongs to another user");
            return Err(ServiceError::Unauthorized);
        }

        Ok(())
    }
}
