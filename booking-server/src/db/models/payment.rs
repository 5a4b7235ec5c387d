//! Payment Model
//!
//! 每个预订一条逻辑支付记录，余额为派生值 (总额 - 已付)。
//! 读取时取最新一行。

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub booking_id: String,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub remaining_balance: Decimal,
    pub payment_method: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Payment update payload (partial; unset fields keep their stored value)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentUpdate {
    pub total_amount: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub payment_method: Option<String>,
    pub payment_date: Option<NaiveDate>,
}
