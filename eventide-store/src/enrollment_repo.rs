use async_trait::async_trait;
use sqlx::PgPool;

use eventide_core::repository::EnrollmentRepository;
use eventide_core::RepositoryResult;
use eventide_shared::models::Enrollment;

use crate::db_err;
use crate::rows::EnrollmentRow;

const ENROLLMENT_COLUMNS: &str =
    "id, user_id, name, cpf, birthday, phone, created_at, updated_at";

pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    async fn find_by_user_id(&self, user_id: i32) -> RepositoryResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {} FROM enrollments WHERE user_id = $1",
            ENROLLMENT_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Enrollment::from))
    }

    async fn find_by_id(&self, enrollment_id: i32) -> RepositoryResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {} FROM enrollments WHERE id = $1",
            ENROLLMENT_COLUMNS
        ))
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Enrollment::from))
    }
}
