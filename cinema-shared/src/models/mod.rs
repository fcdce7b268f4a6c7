pub mod events;

pub use events::{BookingSubmittedEvent, DiscountDroppedEvent};
