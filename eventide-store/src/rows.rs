//! Row shapes returned by the queries and their conversion into shared models.

use chrono::{DateTime, Utc};

use eventide_core::{RepositoryError, RepositoryResult};
use eventide_shared::models::{
    Booking, BookingWithRoom, Enrollment, Hotel, Payment, Room, Ticket, TicketStatus, TicketType,
    TicketWithType,
};

#[derive(sqlx::FromRow)]
pub(crate) struct EnrollmentRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            cpf: row.cpf,
            birthday: row.birthday,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct TicketTypeRow {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TicketTypeRow> for TicketType {
    fn from(row: TicketTypeRow) -> Self {
        TicketType {
            id: row.id,
            name: row.name,
            price: row.price,
            is_remote: row.is_remote,
            includes_hotel: row.includes_hotel,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct TicketRow {
    pub id: i32,
    pub ticket_type_id: i32,
    pub enrollment_id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketRow {
    pub fn into_ticket(self) -> RepositoryResult<Ticket> {
        Ok(Ticket {
            id: self.id,
            ticket_type_id: self.ticket_type_id,
            enrollment_id: self.enrollment_id,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Ticket joined with its type; type columns are prefixed with `type_`.
#[derive(sqlx::FromRow)]
pub(crate) struct TicketWithTypeRow {
    pub id: i32,
    pub ticket_type_id: i32,
    pub enrollment_id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub type_name: String,
    pub type_price: i32,
    pub type_is_remote: bool,
    pub type_includes_hotel: bool,
    pub type_created_at: DateTime<Utc>,
    pub type_updated_at: DateTime<Utc>,
}

impl TicketWithTypeRow {
    pub fn into_model(self) -> RepositoryResult<TicketWithType> {
        Ok(TicketWithType {
            ticket_type: TicketType {
                id: self.ticket_type_id,
                name: self.type_name,
                price: self.type_price,
                is_remote: self.type_is_remote,
                includes_hotel: self.type_includes_hotel,
                created_at: self.type_created_at,
                updated_at: self.type_updated_at,
            },
            ticket: Ticket {
                id: self.id,
                ticket_type_id: self.ticket_type_id,
                enrollment_id: self.enrollment_id,
                status: parse_status(&self.status)?,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        })
    }
}

pub(crate) const TICKET_WITH_TYPE_COLUMNS: &str = r#"
    t.id, t.ticket_type_id, t.enrollment_id, t.status, t.created_at, t.updated_at,
    tt.name AS type_name, tt.price AS type_price, tt.is_remote AS type_is_remote,
    tt.includes_hotel AS type_includes_hotel, tt.created_at AS type_created_at,
    tt.updated_at AS type_updated_at
"#;

fn parse_status(value: &str) -> RepositoryResult<TicketStatus> {
    TicketStatus::parse(value)
        .ok_or_else(|| RepositoryError::storage(format!("unknown ticket status {:?}", value)))
}

#[derive(sqlx::FromRow)]
pub(crate) struct HotelRow {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct RoomRow {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            hotel_id: row.hotel_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Booking joined with its room; room columns are prefixed with `room_`.
#[derive(sqlx::FromRow)]
pub(crate) struct BookingWithRoomRow {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room_name: String,
    pub room_capacity: i32,
    pub room_hotel_id: i32,
    pub room_created_at: DateTime<Utc>,
    pub room_updated_at: DateTime<Utc>,
}

impl From<BookingWithRoomRow> for BookingWithRoom {
    fn from(row: BookingWithRoomRow) -> Self {
        BookingWithRoom {
            room: Room {
                id: row.room_id,
                name: row.room_name,
                capacity: row.room_capacity,
                hotel_id: row.room_hotel_id,
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
            booking: Booking {
                id: row.id,
                user_id: row.user_id,
                room_id: row.room_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PaymentRow {
    pub id: i32,
    pub ticket_id: i32,
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            ticket_id: row.ticket_id,
            value: row.value,
            card_issuer: row.card_issuer,
            card_last_digits: row.card_last_digits,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
