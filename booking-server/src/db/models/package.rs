//! Package Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bundled tour package (stay + activities)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub inclusions: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageCreate {
    pub name: String,
    pub description: Option<String>,
    pub inclusions: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub inclusions: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
}
