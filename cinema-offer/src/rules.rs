use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinema_shared::money::Amount;

use crate::expiry::{ActivityWindow, WindowState};
use crate::models::{cap_of, minimum_of, Coupon, CouponStatus, DiscountInstrument, Event, EventStatus};

/// Why a discount does not apply to an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ineligibility {
    #[error("discount is not active")]
    Inactive,

    #[error("discount has no uses left")]
    SoldOut,

    #[error("discount has not started yet")]
    NotStarted,

    #[error("discount has ended")]
    Ended,

    #[error("order amount is below the minimum of {minimum}")]
    BelowMinimum { minimum: Amount },
}

/// The terms every discount instrument exposes to the eligibility and
/// discount rules, whatever its concrete shape.
pub trait DiscountTerms {
    fn is_status_active(&self) -> bool;

    /// `false` only when a quantity limit exists and is used up.
    fn has_stock(&self) -> bool {
        true
    }

    fn minimum_order_amount(&self) -> Amount;

    /// `None` when uncapped (absent or zero upstream)
    fn maximum_discount_amount(&self) -> Option<Amount>;

    fn window(&self) -> ActivityWindow;

    fn check_eligibility_at(&self, order_amount: Amount, now: DateTime<Utc>) -> Result<(), Ineligibility> {
        if !self.is_status_active() {
            return Err(Ineligibility::Inactive);
        }
        if !self.has_stock() {
            return Err(Ineligibility::SoldOut);
        }
        match self.window().state_at(now) {
            WindowState::NotStarted => return Err(Ineligibility::NotStarted),
            WindowState::Ended => return Err(Ineligibility::Ended),
            WindowState::Open => {}
        }
        let minimum = self.minimum_order_amount();
        if order_amount.max(0) < minimum {
            return Err(Ineligibility::BelowMinimum { minimum });
        }
        Ok(())
    }

    fn is_eligible_at(&self, order_amount: Amount, now: DateTime<Utc>) -> bool {
        self.check_eligibility_at(order_amount, now).is_ok()
    }
}

impl DiscountTerms for Coupon {
    fn is_status_active(&self) -> bool {
        self.status == CouponStatus::Active
    }

    fn has_stock(&self) -> bool {
        self.remaining().map_or(true, |left| left > 0)
    }

    fn minimum_order_amount(&self) -> Amount {
        minimum_of(self.minimum_order_amount)
    }

    fn maximum_discount_amount(&self) -> Option<Amount> {
        cap_of(self.maximum_discount_amount)
    }

    fn window(&self) -> ActivityWindow {
        Coupon::window(self)
    }
}

impl DiscountTerms for Event {
    fn is_status_active(&self) -> bool {
        self.status == EventStatus::Active
    }

    fn minimum_order_amount(&self) -> Amount {
        minimum_of(self.minimum_order_amount)
    }

    fn maximum_discount_amount(&self) -> Option<Amount> {
        cap_of(self.maximum_discount_amount)
    }

    fn window(&self) -> ActivityWindow {
        Event::window(self)
    }
}

impl DiscountTerms for DiscountInstrument {
    fn is_status_active(&self) -> bool {
        match self {
            DiscountInstrument::Coupon(c) => c.is_status_active(),
            DiscountInstrument::Event(e) => e.is_status_active(),
        }
    }

    fn has_stock(&self) -> bool {
        match self {
            DiscountInstrument::Coupon(c) => c.has_stock(),
            DiscountInstrument::Event(e) => e.has_stock(),
        }
    }

    fn minimum_order_amount(&self) -> Amount {
        match self {
            DiscountInstrument::Coupon(c) => DiscountTerms::minimum_order_amount(c),
            DiscountInstrument::Event(e) => DiscountTerms::minimum_order_amount(e),
        }
    }

    fn maximum_discount_amount(&self) -> Option<Amount> {
        match self {
            DiscountInstrument::Coupon(c) => DiscountTerms::maximum_discount_amount(c),
            DiscountInstrument::Event(e) => DiscountTerms::maximum_discount_amount(e),
        }
    }

    fn window(&self) -> ActivityWindow {
        match self {
            DiscountInstrument::Coupon(c) => c.window(),
            DiscountInstrument::Event(e) => e.window(),
        }
    }
}

/// Keep the candidates usable for `order_amount` at `now`, in their original
/// order. Upstream lists are usually pre-filtered but are checked again here.
pub fn filter_applicable_instruments_at<T>(catalog: &[T], order_amount: Amount, now: DateTime<Utc>) -> Vec<T>
where
    T: DiscountTerms + Clone,
{
    catalog
        .iter()
        .filter(|candidate| candidate.is_eligible_at(order_amount, now))
        .cloned()
        .collect()
}

pub fn filter_applicable_instruments<T>(catalog: &[T], order_amount: Amount) -> Vec<T>
where
    T: DiscountTerms + Clone,
{
    filter_applicable_instruments_at(catalog, order_amount, Utc::now())
}
