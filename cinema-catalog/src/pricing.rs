use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use cinema_shared::money::{self, Amount};

use crate::seat::{Seat, SeatType};
use crate::selection::SeatSelection;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fallback price of a REGULAR seat
    pub base_seat_price: Amount,

    /// VIP fallback = base × this
    pub vip_multiplier: f64,

    /// COUPLE fallback = base × this
    pub couple_multiplier: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_seat_price: 80_000,
            vip_multiplier: 1.5,
            couple_multiplier: 2.0,
        }
    }
}

/// Seat pricing. Pure: no I/O, no clock, no errors.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Type-based price used when the backend did not assign one
    pub fn fallback_price(&self, seat_type: SeatType) -> Amount {
        let base = self.config.base_seat_price.max(0);
        match seat_type {
            SeatType::Regular => base,
            SeatType::Vip => money::scale(base, self.config.vip_multiplier),
            SeatType::Couple => money::scale(base, self.config.couple_multiplier),
        }
    }

    /// The seat's own price when it is a usable positive number, otherwise the
    /// type fallback. Missing, zero, negative and NaN prices all fall back.
    pub fn effective_seat_price(&self, seat: &Seat) -> Amount {
        match seat.price.map(money::sanitize_amount) {
            Some(price) if price > 0 => price,
            _ => self.fallback_price(seat.seat_type),
        }
    }

    /// Sum of effective prices. A seat id appearing twice is only counted once.
    pub fn compute_subtotal(&self, seats: &[Seat]) -> Amount {
        let mut seen = HashSet::with_capacity(seats.len());
        money::saturating_sum(
            seats
                .iter()
                .filter(|seat| seen.insert(seat.id))
                .map(|seat| self.effective_seat_price(seat)),
        )
    }

    pub fn subtotal_of(&self, selection: &SeatSelection) -> Amount {
        // SeatSelection is already unique by id
        money::saturating_sum(selection.iter().map(|seat| self.effective_seat_price(seat)))
    }

    /// `max(0, order_amount - discount)`
    pub fn compute_total(&self, order_amount: Amount, discount: Amount) -> Amount {
        compute_total(order_amount, discount)
    }
}

pub fn compute_total(order_amount: Amount, discount: Amount) -> Amount {
    order_amount.saturating_sub(discount.max(0)).max(0)
}
