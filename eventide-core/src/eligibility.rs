use std::sync::Arc;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::repository::{EnrollmentRepository, TicketRepository};

/// Decides whether a user may book a room at all.
#[derive(Clone)]
pub struct EligibilityChecker {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl EligibilityChecker {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self { enrollments, tickets }
    }

    /// Succeeds only for a user whose enrollment holds a paid ticket that
    /// includes the hotel benefit. Every failure is `CannotBook`.
    pub async fn check_enrollment_ticket(&self, user_id: i32) -> ServiceResult<()> {
        let enrollment = match self.enrollments.find_by_user_id(user_id).await? {
            Some(enrollment) => enrollment,
            None => {
                debug!(user_id, "No enrollment, booking refused");
                return Err(ServiceError::CannotBook);
            }
        };

        let ticket = match self.tickets.find_by_enrollment_id(enrollment.id).await? {
            Some(ticket) => ticket,
            None => {
                debug!(user_id, enrollment_id = enrollment.id, "No ticket, booking refused");
                return Err(ServiceError::CannotBook);
            }
        };

        if !ticket.grants_hotel() {
            debug!(
                user_id,
                status = %ticket.ticket.status,
                includes_hotel = ticket.ticket_type.includes_hotel,
                "Ticket does not allow hotel booking"
            );
            return Err(ServiceError::CannotBook);
        }

        Ok(())
    }
}
