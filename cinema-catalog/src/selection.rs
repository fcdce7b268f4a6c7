use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::seat::{Seat, SeatId};

/// Seats picked by the user for one showtime, unique by id, in pick order.
///
/// Deserializing from a list drops repeated ids so a client cannot smuggle the
/// same seat in twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Seat>", into = "Vec<Seat>")]
pub struct SeatSelection {
    seats: Vec<Seat>,
}

impl SeatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, seat_id: SeatId) -> bool {
        self.seats.iter().any(|s| s.id == seat_id)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat_ids(&self) -> Vec<SeatId> {
        self.seats.iter().map(|s| s.id).collect()
    }

    pub fn seat_numbers(&self) -> Vec<&str> {
        self.seats.iter().map(|s| s.seat_number.as_str()).collect()
    }

    /// Returns the selection with `seat` toggled, see [`toggle_seat_selection`].
    pub fn toggled(&self, seat: &Seat) -> Self {
        toggle_seat_selection(self, seat)
    }

    /// Re-sync against a fresh seat map: seats that are gone or no longer
    /// AVAILABLE are dropped, the rest pick up the latest price. Returns the
    /// seats that were dropped.
    pub fn reconcile(&mut self, latest: &[Seat]) -> Vec<Seat> {
        let by_id: HashMap<SeatId, &Seat> = latest.iter().map(|s| (s.id, s)).collect();
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(self.seats.len());

        for seat in self.seats.drain(..) {
            match by_id.get(&seat.id) {
                Some(fresh) if fresh.is_selectable() => kept.push((*fresh).clone()),
                _ => dropped.push(seat),
            }
        }

        self.seats = kept;
        dropped
    }
}

/// Select `seat` if absent, deselect it if present (matched by id).
///
/// Seats whose status is anything but AVAILABLE (BOOKED, RESERVED,
/// MAINTENANCE, OCCUPIED, or a stale SELECTED from the server) are never
/// toggled; the selection comes back unchanged.
pub fn toggle_seat_selection(selection: &SeatSelection, seat: &Seat) -> SeatSelection {
    if !seat.is_selectable() {
        return selection.clone();
    }

    let mut seats = selection.seats.clone();
    if let Some(pos) = seats.iter().position(|s| s.id == seat.id) {
        seats.remove(pos);
    } else {
        seats.push(seat.clone());
    }
    SeatSelection { seats }
}

impl From<Vec<Seat>> for SeatSelection {
    fn from(seats: Vec<Seat>) -> Self {
        let mut unique: Vec<Seat> = Vec::with_capacity(seats.len());
        for seat in seats {
            if !unique.iter().any(|s| s.id == seat.id) {
                unique.push(seat);
            }
        }
        Self { seats: unique }
    }
}

impl From<SeatSelection> for Vec<Seat> {
    fn from(selection: SeatSelection) -> Self {
        selection.seats
    }
}
