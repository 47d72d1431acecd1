//! Entity builders shared by the service tests.

use chrono::Utc;
use eventide_shared::models::{
    Booking, BookingWithRoom, Enrollment, Hotel, Payment, Room, Ticket, TicketStatus, TicketType,
    TicketWithType,
};

pub fn enrollment(id: i32, user_id: i32) -> Enrollment {
    let now = Utc::now();
    Enrollment {
        id,
        user_id,
        name: "Ada Lovelace".to_string(),
        cpf: "12345678909".to_string(),
        birthday: now,
        phone: "(21) 98999-9999".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn ticket_type(id: i32, price: i32, includes_hotel: bool) -> TicketType {
    let now = Utc::now();
    TicketType {
        id,
        name: "Presencial".to_string(),
        price,
        is_remote: false,
        includes_hotel,
        created_at: now,
        updated_at: now,
    }
}

pub fn ticket(id: i32, enrollment_id: i32, status: TicketStatus) -> Ticket {
    let now = Utc::now();
    Ticket {
        id,
        ticket_type_id: 1,
        enrollment_id,
        status,
        created_at: now,
        updated_at: now,
    }
}

pub fn ticket_with_type(
    enrollment_id: i32,
    status: TicketStatus,
    includes_hotel: bool,
) -> TicketWithType {
    TicketWithType {
        ticket: ticket(1, enrollment_id, status),
        ticket_type: ticket_type(1, 1000, includes_hotel),
    }
}

pub fn room(id: i32, capacity: i32) -> Room {
    let now = Utc::now();
    Room {
        id,
        name: format!("Room {}", id),
        capacity,
        hotel_id: 1,
        created_at: now,
        updated_at: now,
    }
}

pub fn hotel(id: i32) -> Hotel {
    let now = Utc::now();
    Hotel {
        id,
        name: format!("Hotel {}", id),
        image: "https://example.com/hotel.png".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn booking(id: i32, user_id: i32, room_id: i32) -> Booking {
    let now = Utc::now();
    Booking {
        id,
        user_id,
        room_id,
        created_at: now,
        updated_at: now,
    }
}

pub fn booking_with_room(id: i32, user_id: i32, room_id: i32) -> BookingWithRoom {
    BookingWithRoom {
        booking: booking(id, user_id, room_id),
        room: room(room_id, 3),
    }
}

pub fn bookings_in_room(room_id: i32, count: i32) -> Vec<Booking> {
    (1..=count).map(|n| booking(n, 100 + n, room_id)).collect()
}

pub fn payment(id: i32, ticket_id: i32, value: i32) -> Payment {
    let now = Utc::now();
    Payment {
        id,
        ticket_id,
        value,
        card_issuer: "ok".to_string(),
        card_last_digits: "2323".to_string(),
        created_at: now,
        updated_at: now,
    }
}
