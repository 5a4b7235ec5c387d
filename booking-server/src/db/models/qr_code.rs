//! QR Code Model
//!
//! 收款二维码 (GCash 等)，由管理端维护，前台展示。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QrCode {
    pub id: i64,
    pub label: String,
    pub account_name: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrCodeCreate {
    pub label: String,
    pub account_name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrCodeUpdate {
    pub label: Option<String>,
    pub account_name: Option<String>,
    pub image_url: Option<String>,
}
