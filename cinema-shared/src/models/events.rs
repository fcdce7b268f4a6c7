use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::money::Amount;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingSubmittedEvent {
    pub correlation_id: Uuid,
    pub user_id: String,
    pub showtime_id: i64,
    pub seat_count: usize,
    pub subtotal: Amount,
    pub discount: Amount,
    pub total: Amount,
    pub discount_ref: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Emitted when a previously selected coupon or event stops applying to the order.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct DiscountDroppedEvent {
    pub discount_ref: String,
    pub order_amount: Amount,
    pub reason: String,
    pub dropped_at: DateTime<Utc>,
}

impl BookingSubmittedEvent {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl DiscountDroppedEvent {
    pub fn new(discount_ref: String, order_amount: Amount, reason: String) -> Self {
        Self {
            discount_ref,
            order_amount,
            reason,
            dropped_at: Utc::now(),
        }
    }
}
