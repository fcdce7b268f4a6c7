use serde::{Deserialize, Serialize};

pub type SeatId = i64;

/// Seat types in a screening room
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatType {
    #[default]
    Regular,
    Vip,
    Couple,
}

/// Seat status as reported by the backend for one showtime
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    #[default]
    Available,
    Booked,
    Reserved,
    Maintenance,
    Selected,
    Occupied,
}

impl SeatStatus {
    /// Only AVAILABLE seats may enter a selection.
    pub fn is_selectable(&self) -> bool {
        matches!(self, SeatStatus::Available)
    }
}

/// A seat for one showtime. Read-only apart from the client-side selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: SeatId,
    pub seat_number: String,
    #[serde(default)]
    pub seat_type: SeatType,
    /// Server-assigned price; may be missing or junk, see `PricingEngine::effective_seat_price`.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: SeatStatus,
}

impl Seat {
    pub fn new(id: SeatId, seat_number: impl Into<String>, seat_type: SeatType) -> Self {
        Self {
            id,
            seat_number: seat_number.into(),
            seat_type,
            price: None,
            status: SeatStatus::Available,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_status(mut self, status: SeatStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_selectable(&self) -> bool {
        self.status.is_selectable()
    }
}
