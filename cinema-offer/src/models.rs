use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use cinema_shared::money::{self, Amount};
use cinema_shared::time::deserialize_optional_instant;

use crate::expiry::ActivityWindow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponType {
    Percentage,
    FixedAmount,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponStatus {
    Active,
    Inactive,
    Expired,
    Exhausted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Inactive,
    Expired,
    Cancelled,
}

/// Code-redeemable discount with a quantity limit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub discount_value: f64,
    #[serde(default)]
    pub minimum_order_amount: f64,
    #[serde(default)]
    pub maximum_discount_amount: Option<f64>,
    #[serde(default)]
    pub total_quantity: Option<i64>,
    #[serde(default)]
    pub used_quantity: Option<i64>,
    #[serde(default)]
    pub remaining_quantity: Option<i64>,
    pub status: CouponStatus,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Uses left. Taken from `remainingQuantity` when the backend sends it,
    /// else derived from total and used. `None` means no quantity limit.
    pub fn remaining(&self) -> Option<i64> {
        match (self.remaining_quantity, self.total_quantity) {
            (Some(remaining), _) => Some(remaining),
            (None, Some(total)) => Some(total.saturating_sub(self.used_quantity.unwrap_or(0))),
            (None, None) => None,
        }
    }

    pub fn window(&self) -> ActivityWindow {
        ActivityWindow::new(self.start_date, self.end_date)
    }
}

/// Time-bounded promotion, no per-user quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    pub discount_percentage: f64,
    #[serde(default)]
    pub minimum_order_amount: f64,
    #[serde(default)]
    pub maximum_discount_amount: Option<f64>,
    pub status: EventStatus,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Event {
    pub fn window(&self) -> ActivityWindow {
        ActivityWindow::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    Coupon,
    Event,
}

/// How a chosen discount is identified to the backend: coupons by code,
/// events by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountRef {
    Coupon { code: String },
    Event { id: i64 },
}

impl fmt::Display for DiscountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountRef::Coupon { code } => write!(f, "coupon:{}", code),
            DiscountRef::Event { id } => write!(f, "event:{}", id),
        }
    }
}

/// Either of the two mutually exclusive discount mechanisms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountInstrument {
    Coupon(Coupon),
    Event(Event),
}

impl DiscountInstrument {
    pub fn kind(&self) -> DiscountKind {
        match self {
            DiscountInstrument::Coupon(_) => DiscountKind::Coupon,
            DiscountInstrument::Event(_) => DiscountKind::Event,
        }
    }

    pub fn reference(&self) -> DiscountRef {
        match self {
            DiscountInstrument::Coupon(c) => DiscountRef::Coupon { code: c.code.clone() },
            DiscountInstrument::Event(e) => DiscountRef::Event { id: e.id },
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            DiscountInstrument::Coupon(c) => c.name.as_deref().unwrap_or(&c.code),
            DiscountInstrument::Event(e) => &e.name,
        }
    }
}

impl From<Coupon> for DiscountInstrument {
    fn from(coupon: Coupon) -> Self {
        DiscountInstrument::Coupon(coupon)
    }
}

impl From<Event> for DiscountInstrument {
    fn from(event: Event) -> Self {
        DiscountInstrument::Event(event)
    }
}

/// Minimum order amount as whole units; junk reads as 0.
pub(crate) fn minimum_of(raw: f64) -> Amount {
    money::sanitize_amount(raw)
}

/// A zero or absent maximum means "no cap".
pub(crate) fn cap_of(raw: Option<f64>) -> Option<Amount> {
    money::sanitize_optional(raw).filter(|cap| *cap > 0)
}
