pub mod quote;
pub mod session;
pub mod checkout;

pub use quote::{AppliedDiscount, DiscountNotice, DiscountSource, Quote};
pub use session::{BookingSession, ServerDiscount};
pub use checkout::{ApplicableDiscounts, CheckoutService, SeatView};
