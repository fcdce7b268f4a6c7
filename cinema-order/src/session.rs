use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinema_catalog::{PricingEngine, Seat, SeatSelection};
use cinema_offer::{evaluate_discount_at, DiscountChoice, DiscountRef, DiscountSelection, ValidationResult};
use cinema_shared::Amount;

use crate::quote::{AppliedDiscount, DiscountNotice, DiscountSource, Quote};

/// The backend's verdict on the selected discount, pinned to the order amount
/// it was given. Only trusted while the subtotal is unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerDiscount {
    pub reference: DiscountRef,
    pub order_amount: Amount,
    pub discount: Amount,
}

/// Everything a booking screen holds between requests, in one serializable
/// value. Pricing is derived from it on demand and never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSession {
    pub showtime_id: i64,
    #[serde(default)]
    pub selected_seats: SeatSelection,
    #[serde(default)]
    pub discount: DiscountSelection,
    #[serde(default)]
    pub server_discount: Option<ServerDiscount>,
}

impl BookingSession {
    pub fn new(showtime_id: i64) -> Self {
        Self {
            showtime_id,
            ..Default::default()
        }
    }

    pub fn toggle_seat(&mut self, seat: &Seat) {
        self.selected_seats = self.selected_seats.toggled(seat);
    }

    /// Apply a coupon/event pick. Any earlier backend verdict is discarded.
    pub fn select_discount(&mut self, choice: DiscountChoice) {
        self.discount = self.discount.select(choice);
        self.server_discount = None;
    }

    pub fn clear_discount(&mut self) {
        self.discount = DiscountSelection::none();
        self.server_discount = None;
    }

    /// Record the backend's answer for the currently selected discount,
    /// computed for `order_amount`. A rejection clears the selection and is
    /// returned as a notice for the user.
    pub fn apply_server_validation(&mut self, result: &ValidationResult, order_amount: Amount) -> Option<DiscountNotice> {
        let reference = self.discount.active()?.reference();

        if !result.valid {
            self.clear_discount();
            return Some(DiscountNotice::Rejected {
                reference,
                message: result.message_or_default().to_string(),
            });
        }

        self.server_discount = result.granted_discount(order_amount).map(|discount| ServerDiscount {
            reference,
            order_amount: order_amount.max(0),
            discount,
        });
        None
    }

    pub fn quote(&self, engine: &PricingEngine) -> Quote {
        self.quote_at(engine, Utc::now())
    }

    /// Subtotal, then the discount re-checked against that subtotal, then the
    /// total, in a single pass over the current state.
    pub fn quote_at(&self, engine: &PricingEngine, now: DateTime<Utc>) -> Quote {
        let subtotal = engine.subtotal_of(&self.selected_seats);
        let active = self.discount.active();
        let outcome = evaluate_discount_at(subtotal, active.as_ref(), now);

        let mut quote = Quote {
            seat_count: self.selected_seats.len(),
            subtotal,
            ..Quote::empty()
        };

        let Some(instrument) = active else {
            quote.total = engine.compute_total(subtotal, 0);
            return quote;
        };
        let reference = instrument.reference();

        if let Some(reason) = outcome.ineligible {
            quote.total = engine.compute_total(subtotal, 0);
            quote.notice = Some(DiscountNotice::Removed {
                reference,
                message: reason.to_string(),
                reason,
            });
            return quote;
        }

        let (discount, source) = match &self.server_discount {
            Some(server) if server.reference == reference && server.order_amount == subtotal => {
                (server.discount.clamp(0, subtotal), DiscountSource::Server)
            }
            _ => (outcome.amount, DiscountSource::Preview),
        };

        quote.discount = discount;
        quote.total = engine.compute_total(subtotal, discount);
        quote.applied_discount = Some(AppliedDiscount {
            reference,
            name: instrument.display_name().to_string(),
            amount: discount,
            source,
        });
        quote
    }
}
