use async_trait::async_trait;
use sqlx::PgPool;

use eventide_core::repository::TicketRepository;
use eventide_core::RepositoryResult;
use eventide_shared::models::{NewTicket, Ticket, TicketType, TicketWithType};

use crate::db_err;
use crate::rows::{TicketRow, TicketTypeRow, TicketWithTypeRow, TICKET_WITH_TYPE_COLUMNS};

const TICKET_COLUMNS: &str = "id, ticket_type_id, enrollment_id, status, created_at, updated_at";

pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_with_type_where(
        &self,
        column: &str,
        value: i32,
    ) -> RepositoryResult<Option<TicketWithType>> {
        let row = sqlx::query_as::<_, TicketWithTypeRow>(&format!(
            "SELECT {} FROM tickets t JOIN ticket_types tt ON tt.id = t.ticket_type_id WHERE t.{} = $1",
            TICKET_WITH_TYPE_COLUMNS, column
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(TicketWithTypeRow::into_model).transpose()
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> RepositoryResult<Option<TicketWithType>> {
        self.find_with_type_where("enrollment_id", enrollment_id).await
    }

    async fn find_by_id(&self, ticket_id: i32) -> RepositoryResult<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "SELECT {} FROM tickets WHERE id = $1",
            TICKET_COLUMNS
        ))
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(TicketRow::into_ticket).transpose()
    }

    async fn find_with_type_by_id(
        &self,
        ticket_id: i32,
    ) -> RepositoryResult<Option<TicketWithType>> {
        self.find_with_type_where("id", ticket_id).await
    }

    async fn find_ticket_types(&self) -> RepositoryResult<Vec<TicketType>> {
        let rows = sqlx::query_as::<_, TicketTypeRow>(
            "SELECT id, name, price, is_remote, includes_hotel, created_at, updated_at FROM ticket_types ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(TicketType::from).collect())
    }

    async fn create_ticket(&self, ticket: NewTicket) -> RepositoryResult<TicketWithType> {
        let row = sqlx::query_as::<_, TicketWithTypeRow>(&format!(
            r#"
            WITH t AS (
                INSERT INTO tickets (ticket_type_id, enrollment_id, status)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {} FROM t JOIN ticket_types tt ON tt.id = t.ticket_type_id
            "#,
            TICKET_WITH_TYPE_COLUMNS
        ))
        .bind(ticket.ticket_type_id)
        .bind(ticket.enrollment_id)
        .bind(ticket.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row.into_model()
    }
}
