use serde::{Deserialize, Serialize};

use cinema_offer::{DiscountRef, Ineligibility};
use cinema_shared::Amount;

/// Where the discount figure in a quote came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountSource {
    /// Local computation, pending the backend's answer
    Preview,
    /// The backend's validate endpoint
    Server,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub reference: DiscountRef,
    pub name: String,
    pub amount: Amount,
    pub source: DiscountSource,
}

/// Something the user should be told about their discount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountNotice {
    /// The order stopped qualifying, the discount is not applied
    Removed {
        reference: DiscountRef,
        reason: Ineligibility,
        message: String,
    },
    /// The backend refused the discount when it was picked
    Rejected { reference: DiscountRef, message: String },
}

/// Totals for the current session, always recomputed as a whole
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub seat_count: usize,
    pub subtotal: Amount,
    pub discount: Amount,
    pub total: Amount,
    pub applied_discount: Option<AppliedDiscount>,
    pub notice: Option<DiscountNotice>,
}

impl Quote {
    pub fn empty() -> Self {
        Self {
            seat_count: 0,
            subtotal: 0,
            discount: 0,
            total: 0,
            applied_discount: None,
            notice: None,
        }
    }

    pub fn discount_ref(&self) -> Option<&DiscountRef> {
        self.applied_discount.as_ref().map(|d| &d.reference)
    }
}
