use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Reserved => "RESERVED",
            TicketStatus::Paid => "PAID",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "RESERVED" => Some(TicketStatus::Reserved),
            "PAID" => Some(TicketStatus::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i32,
    pub ticket_type_id: i32,
    pub enrollment_id: i32,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ticket joined with its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketWithType {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub ticket_type: TicketType,
}

impl TicketWithType {
    /// Paid tickets whose type includes the hotel benefit grant access to
    /// hotel listings and room bookings.
    pub fn grants_hotel(&self) -> bool {
        self.ticket.status == TicketStatus::Paid && self.ticket_type.includes_hotel
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub ticket_type_id: i32,
    pub enrollment_id: i32,
    pub status: TicketStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: TicketStatus, includes_hotel: bool) -> TicketWithType {
        let now = Utc::now();
        TicketWithType {
            ticket: Ticket {
                id: 1,
                ticket_type_id: 2,
                enrollment_id: 3,
                status,
                created_at: now,
                updated_at: now,
            },
            ticket_type: TicketType {
                id: 2,
                name: "Presencial + Hotel".to_string(),
                price: 600,
                is_remote: false,
                includes_hotel,
                created_at: now,
                updated_at: now,
            },
        }
    }

    #[test]
    fn test_grants_hotel_requires_paid_and_hotel_benefit() {
        assert!(ticket(TicketStatus::Paid, true).grants_hotel());
        assert!(!ticket(TicketStatus::Reserved, true).grants_hotel());
        assert!(!ticket(TicketStatus::Paid, false).grants_hotel());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TicketStatus::Reserved).unwrap();
        assert_eq!(json, "\"RESERVED\"");
        assert_eq!(TicketStatus::parse("PAID"), Some(TicketStatus::Paid));
        assert_eq!(TicketStatus::parse("paid"), None);
    }

    #[test]
    fn test_ticket_with_type_flattens_ticket_fields() {
        let value = serde_json::to_value(ticket(TicketStatus::Paid, true)).unwrap();
        assert_eq!(value["enrollmentId"], 3);
        assert_eq!(value["status"], "PAID");
        assert_eq!(value["ticketType"]["includesHotel"], true);
    }
}
