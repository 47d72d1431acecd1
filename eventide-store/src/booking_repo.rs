use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use eventide_core::repository::BookingRepository;
use eventide_core::{RepositoryError, RepositoryResult};
use eventide_shared::models::{Booking, BookingUpsert, BookingWithRoom, NewBooking};

use crate::db_err;
use crate::rows::{BookingRow, BookingWithRoomRow};

const BOOKING_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

/// Unique index holding one booking per user.
const USER_BOOKING_INDEX: &str = "idx_bookings_user_id";

/// Booking rows in Postgres.
///
/// Writes lock the target room row and recount its bookings inside the same
/// transaction, so concurrent writers cannot push a room past its capacity.
/// The unique index on `bookings.user_id` keeps one booking per user.
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock `room_id` and make sure one more booking fits. `moving` is the id of a
/// booking being reassigned, which must not count against the target room.
async fn reserve_slot(
    tx: &mut Transaction<'_, Postgres>,
    room_id: i32,
    moving: Option<i32>,
) -> RepositoryResult<()> {
    let capacity: Option<i32> =
        sqlx::query_scalar("SELECT capacity FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_err)?;

    let capacity = capacity
        .ok_or_else(|| RepositoryError::storage(format!("room {} does not exist", room_id)))?;

    let occupied: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE room_id = $1 AND ($2::int IS NULL OR id <> $2)",
    )
    .bind(room_id)
    .bind(moving)
    .fetch_one(&mut **tx)
    .await
    .map_err(db_err)?;

    if occupied >= i64::from(capacity) {
        debug!(room_id, occupied, capacity, "Refusing booking write, room is full");
        return Err(RepositoryError::RoomFull { room_id });
    }

    Ok(())
}

fn write_err(err: sqlx::Error, user_id: i32) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() && db.constraint() == Some(USER_BOOKING_INDEX) {
            warn!(user_id, "Duplicate booking refused by unique index");
            return RepositoryError::DuplicateBooking { user_id };
        }
    }
    db_err(err)
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_by_user_id(&self, user_id: i32) -> RepositoryResult<Option<BookingWithRoom>> {
        let row = sqlx::query_as::<_, BookingWithRoomRow>(
            r#"
            SELECT b.id, b.user_id, b.room_id, b.created_at, b.updated_at,
                   r.name AS room_name, r.capacity AS room_capacity, r.hotel_id AS room_hotel_id,
                   r.created_at AS room_created_at, r.updated_at AS room_updated_at
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(BookingWithRoom::from))
    }

    async fn find_by_room_id(&self, room_id: i32) -> RepositoryResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE room_id = $1 ORDER BY id",
            BOOKING_COLUMNS
        ))
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn create(&self, booking: NewBooking) -> RepositoryResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        reserve_slot(&mut tx, booking.room_id, None).await?;

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "INSERT INTO bookings (user_id, room_id) VALUES ($1, $2) RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(booking.user_id)
        .bind(booking.room_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_err(e, booking.user_id))?;

        tx.commit().await.map_err(db_err)?;

        Ok(row.into())
    }

    async fn upsert(&self, booking: BookingUpsert) -> RepositoryResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        reserve_slot(&mut tx, booking.room_id, Some(booking.id)).await?;

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            INSERT INTO bookings (id, user_id, room_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
                SET room_id = EXCLUDED.room_id,
                    user_id = EXCLUDED.user_id,
                    updated_at = NOW()
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.room_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_err(e, booking.user_id))?;

        tx.commit().await.map_err(db_err)?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct UniqueViolation {
        constraint: &'static str,
    }

    impl fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "duplicate key value violates unique constraint \"{}\"", self.constraint)
        }
    }

    impl StdError for UniqueViolation {}

    impl DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    fn violation(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(UniqueViolation { constraint }))
    }

    #[test]
    fn test_user_index_violation_is_duplicate_booking() {
        let err = write_err(violation(USER_BOOKING_INDEX), 7);
        assert!(matches!(err, RepositoryError::DuplicateBooking { user_id: 7 }));
    }

    #[test]
    fn test_other_unique_violation_stays_storage() {
        let err = write_err(violation("bookings_pkey"), 7);
        assert!(matches!(err, RepositoryError::Storage(_)));
    }

    #[test]
    fn test_non_database_error_stays_storage() {
        let err = write_err(sqlx::Error::RowNotFound, 7);
        assert!(matches!(err, RepositoryError::Storage(_)));
    }
}
