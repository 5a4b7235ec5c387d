//! Van Destination Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Van rental destination with its flat rate
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VanDestination {
    pub id: i64,
    pub destination: String,
    pub rate: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VanDestinationCreate {
    pub destination: String,
    pub rate: Option<Decimal>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VanDestinationUpdate {
    pub destination: Option<String>,
    pub rate: Option<Decimal>,
    pub image_url: Option<String>,
}
