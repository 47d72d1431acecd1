use async_trait::async_trait;
use sqlx::PgPool;

use eventide_core::repository::RoomRepository;
use eventide_core::RepositoryResult;
use eventide_shared::models::Room;

use crate::db_err;
use crate::rows::RoomRow;

pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn find_by_id(&self, room_id: i32) -> RepositoryResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, capacity, hotel_id, created_at, updated_at FROM rooms WHERE id = $1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Room::from))
    }
}
