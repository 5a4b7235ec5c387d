//! Hotel Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hotel catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub room_rate: Option<Decimal>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelCreate {
    pub name: String,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub room_rate: Option<Decimal>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub room_rate: Option<Decimal>,
    pub image_url: Option<String>,
}
