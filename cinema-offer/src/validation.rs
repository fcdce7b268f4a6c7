use serde::{Deserialize, Serialize};

use cinema_shared::money::{self, Amount};

/// Body of `POST /coupon/validate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidationRequest {
    pub coupon_code: String,
    pub order_amount: Amount,
    pub user_id: String,
}

/// Body of `POST /event/validate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventValidationRequest {
    pub event_id: i64,
    pub order_amount: Amount,
    pub user_id: String,
}

/// The backend's authoritative answer for a selected coupon or event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub final_amount: Option<f64>,
}

impl ValidationResult {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            discount_amount: None,
            final_amount: None,
        }
    }

    /// Server discount for `order_amount`, clamped to `[0, order_amount]`.
    /// Falls back to `order_amount - finalAmount` when only the final amount
    /// came back. `None` for invalid results or when neither figure is present.
    pub fn granted_discount(&self, order_amount: Amount) -> Option<Amount> {
        if !self.valid {
            return None;
        }
        let order_amount = order_amount.max(0);
        let discount = match (self.discount_amount, self.final_amount) {
            (Some(discount), _) => money::sanitize_amount(discount),
            (None, Some(final_amount)) => order_amount - money::sanitize_amount(final_amount),
            (None, None) => return None,
        };
        Some(discount.clamp(0, order_amount))
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(if self.valid {
            "Discount applied"
        } else {
            "Discount is not valid for this order"
        })
    }
}
