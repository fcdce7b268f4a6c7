pub mod seat;
pub mod showtime;
pub mod pricing;
pub mod selection;
pub mod display;

pub use seat::{Seat, SeatId, SeatStatus, SeatType};
pub use showtime::Showtime;
pub use pricing::{PricingConfig, PricingEngine};
pub use selection::{toggle_seat_selection, SeatSelection};
pub use display::{classify_seat, SeatCategory};
