use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use eventide_core::repository::PaymentRepository;
use eventide_core::{RepositoryError, RepositoryResult};
use eventide_shared::models::{NewPayment, Payment, TicketStatus};

use crate::db_err;
use crate::rows::PaymentRow;

const PAYMENT_COLUMNS: &str =
    "id, ticket_id, value, card_issuer, card_last_digits, created_at, updated_at";

/// Payments in Postgres. Writing a payment also marks its ticket PAID inside
/// the same transaction.
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn find_by_ticket_id(&self, ticket_id: i32) -> RepositoryResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {} FROM payments WHERE ticket_id = $1 ORDER BY id DESC LIMIT 1",
            PAYMENT_COLUMNS
        ))
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Payment::from))
    }

    async fn create_payment_for_ticket(&self, payment: NewPayment) -> RepositoryResult<Payment> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let paid: Option<i32> = sqlx::query_scalar(
            "UPDATE tickets SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING id",
        )
        .bind(TicketStatus::Paid.as_str())
        .bind(payment.ticket_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        if paid.is_none() {
            return Err(RepositoryError::storage(format!(
                "ticket {} does not exist",
                payment.ticket_id
            )));
        }

        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            INSERT INTO payments (ticket_id, value, card_issuer, card_last_digits)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PAYMENT_COLUMNS
        ))
        .bind(payment.ticket_id)
        .bind(payment.value)
        .bind(&payment.card_issuer)
        .bind(&payment.card_last_digits)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        debug!(ticket_id = payment.ticket_id, payment_id = row.id, "Payment recorded, ticket paid");
        Ok(row.into())
    }
}
