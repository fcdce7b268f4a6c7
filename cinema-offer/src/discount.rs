use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinema_shared::money::{self, Amount};

use crate::models::{CouponType, DiscountInstrument};
use crate::rules::{DiscountTerms, Ineligibility};

/// Discount preview for one order amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountOutcome {
    pub amount: Amount,
    /// Set when an instrument was given but no longer qualifies
    pub ineligible: Option<Ineligibility>,
}

impl DiscountOutcome {
    fn none() -> Self {
        Self { amount: 0, ineligible: None }
    }
}

/// Client-side preview of the discount `instrument` grants on `order_amount`.
///
/// Re-checks eligibility first and returns 0 when the order no longer
/// qualifies (typically seats were deselected after the discount was picked).
/// The result is always within `[0, order_amount]` and within the
/// instrument's maximum when it has one.
pub fn evaluate_discount_at(
    order_amount: Amount,
    instrument: Option<&DiscountInstrument>,
    now: DateTime<Utc>,
) -> DiscountOutcome {
    let order_amount = order_amount.max(0);
    let Some(instrument) = instrument else {
        return DiscountOutcome::none();
    };

    if let Err(reason) = instrument.check_eligibility_at(order_amount, now) {
        tracing::debug!(
            discount = %instrument.reference(),
            order_amount,
            %reason,
            "discount no longer applies"
        );
        return DiscountOutcome {
            amount: 0,
            ineligible: Some(reason),
        };
    }

    let raw = match instrument {
        DiscountInstrument::Coupon(coupon) => match coupon.coupon_type {
            CouponType::Percentage => money::percentage_of(order_amount, coupon.discount_value),
            CouponType::FixedAmount => money::sanitize_amount(coupon.discount_value).min(order_amount),
        },
        DiscountInstrument::Event(event) => money::percentage_of(order_amount, event.discount_percentage),
    };

    let capped = match instrument.maximum_discount_amount() {
        Some(cap) => raw.min(cap),
        None => raw,
    };

    DiscountOutcome {
        amount: capped.clamp(0, order_amount),
        ineligible: None,
    }
}

pub fn compute_discount_at(order_amount: Amount, instrument: Option<&DiscountInstrument>, now: DateTime<Utc>) -> Amount {
    evaluate_discount_at(order_amount, instrument, now).amount
}

pub fn compute_discount(order_amount: Amount, instrument: Option<&DiscountInstrument>) -> Amount {
    compute_discount_at(order_amount, instrument, Utc::now())
}
