use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pii::Masked;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    pub ticket_id: i32,
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub ticket_id: i32,
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
}

/// Card details submitted with a payment. Only the issuer and the last four
/// digits are ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub issuer: String,
    pub number: Masked<String>,
    pub name: String,
    pub expiration_date: String,
    pub cvv: Masked<String>,
}

impl CardData {
    pub fn last_digits(&self) -> String {
        let number = self.number.expose();
        match number.char_indices().rev().nth(3) {
            Some((idx, _)) => number[idx..].to_string(),
            None => number.clone(),
        }
    }
}
