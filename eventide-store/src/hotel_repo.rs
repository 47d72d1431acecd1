use async_trait::async_trait;
use sqlx::PgPool;

use eventide_core::repository::HotelRepository;
use eventide_core::RepositoryResult;
use eventide_shared::models::{Hotel, HotelWithRooms, Room};

use crate::db_err;
use crate::rows::{HotelRow, RoomRow};

const HOTEL_COLUMNS: &str = "id, name, image, created_at, updated_at";

pub struct PgHotelRepository {
    pool: PgPool,
}

impl PgHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for PgHotelRepository {
    async fn find_hotels(&self) -> RepositoryResult<Vec<Hotel>> {
        let rows = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {} FROM hotels ORDER BY id",
            HOTEL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn find_with_rooms_by_id(
        &self,
        hotel_id: i32,
    ) -> RepositoryResult<Option<HotelWithRooms>> {
        let hotel = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {} FROM hotels WHERE id = $1",
            HOTEL_COLUMNS
        ))
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let Some(hotel) = hotel else {
            return Ok(None);
        };

        let rooms = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, capacity, hotel_id, created_at, updated_at FROM rooms WHERE hotel_id = $1 ORDER BY id",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Some(HotelWithRooms {
            hotel: hotel.into(),
            rooms: rooms.into_iter().map(Room::from).collect(),
        }))
    }
}
