use serde::{Deserialize, Serialize};

use crate::seat::{Seat, SeatStatus, SeatType};
use crate::selection::SeatSelection;

/// What the seat map should draw for a seat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatCategory {
    Selected,
    Booked,
    Reserved,
    Maintenance,
    VipAvailable,
    CoupleAvailable,
    RegularAvailable,
}

/// Strict priority chain; the first matching rule wins:
/// local selection, BOOKED (or OCCUPIED), RESERVED, MAINTENANCE, then the
/// seat type for everything else.
pub fn classify_seat(seat: &Seat, selection: &SeatSelection) -> SeatCategory {
    if selection.contains(seat.id) {
        SeatCategory::Selected
    } else if matches!(seat.status, SeatStatus::Booked | SeatStatus::Occupied) {
        SeatCategory::Booked
    } else if seat.status == SeatStatus::Reserved {
        SeatCategory::Reserved
    } else if seat.status == SeatStatus::Maintenance {
        SeatCategory::Maintenance
    } else {
        match seat.seat_type {
            SeatType::Vip => SeatCategory::VipAvailable,
            SeatType::Couple => SeatCategory::CoupleAvailable,
            SeatType::Regular => SeatCategory::RegularAvailable,
        }
    }
}
