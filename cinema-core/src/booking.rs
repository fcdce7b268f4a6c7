use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinema_catalog::SeatId;
use cinema_offer::DiscountRef;
use cinema_shared::time::deserialize_optional_instant;
use cinema_shared::{Amount, Masked};

use crate::{CoreError, CoreResult};

/// Booking status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Expired,
}

/// Who the tickets are for. Masked so it never lands in logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: Masked<String>,
    pub email: Masked<String>,
    pub phone: Masked<String>,
}

impl CustomerContact {
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.is_blank() {
            return Err(CoreError::ValidationError("customer name is required".to_string()));
        }
        let email = self.email.expose().trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => return Err(CoreError::ValidationError("customer email is invalid".to_string())),
        }
        let digits = self.phone.expose().chars().filter(|c| c.is_ascii_digit()).count();
        if digits < 9 {
            return Err(CoreError::ValidationError("customer phone is invalid".to_string()));
        }
        Ok(())
    }
}

/// Body of `POST /booking`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub user_id: String,
    pub showtime_id: i64,
    pub total_amount: Amount,
    pub customer_name: Masked<String>,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub booking_status: BookingStatus,
    pub seat_ids: Vec<SeatId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
}

impl BookingRequest {
    pub fn new(
        user_id: String,
        showtime_id: i64,
        seat_ids: Vec<SeatId>,
        total_amount: Amount,
        customer: CustomerContact,
        discount: Option<DiscountRef>,
    ) -> Self {
        let (coupon_code, event_id) = match discount {
            Some(DiscountRef::Coupon { code }) => (Some(code), None),
            Some(DiscountRef::Event { id }) => (None, Some(id)),
            None => (None, None),
        };
        Self {
            user_id,
            showtime_id,
            total_amount,
            customer_name: customer.name,
            customer_email: customer.email,
            customer_phone: customer.phone,
            booking_status: BookingStatus::Pending,
            seat_ids,
            coupon_code,
            event_id,
        }
    }
}

/// A booking record as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub booking_code: Option<String>,
    #[serde(default)]
    pub showtime_id: Option<i64>,
    pub total_amount: f64,
    pub booking_status: BookingStatus,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub created_at: Option<DateTime<Utc>>,
}
