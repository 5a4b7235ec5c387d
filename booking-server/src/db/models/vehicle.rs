//! Vehicle Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rental vehicle catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub vehicle_type: Option<String>,
    pub plate_number: Option<String>,
    pub daily_rate: Decimal,
    pub seats: Option<i32>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleCreate {
    pub name: String,
    pub vehicle_type: Option<String>,
    pub plate_number: Option<String>,
    pub daily_rate: Option<Decimal>,
    pub seats: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleUpdate {
    pub name: Option<String>,
    pub vehicle_type: Option<String>,
    pub plate_number: Option<String>,
    pub daily_rate: Option<Decimal>,
    pub seats: Option<i32>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}
