pub mod booking;
pub mod enrollment;
pub mod hotel;
pub mod payment;
pub mod ticket;

pub use booking::{Booking, BookingUpsert, BookingWithRoom, NewBooking};
pub use enrollment::Enrollment;
pub use hotel::{Hotel, HotelWithRooms, Room};
pub use payment::{CardData, NewPayment, Payment};
pub use ticket::{NewTicket, Ticket, TicketStatus, TicketType, TicketWithType};
