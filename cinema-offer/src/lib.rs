pub mod models;
pub mod expiry;
pub mod rules;
pub mod discount;
pub mod selection;
pub mod validation;

pub use models::{
    Coupon, CouponStatus, CouponType, DiscountInstrument, DiscountKind, DiscountRef, Event, EventStatus,
};
pub use expiry::{ActivityWindow, WindowState};
pub use rules::{filter_applicable_instruments, filter_applicable_instruments_at, DiscountTerms, Ineligibility};
pub use discount::{compute_discount, compute_discount_at, evaluate_discount_at, DiscountOutcome};
pub use selection::{select_discount, DiscountChoice, DiscountSelection, SelectionError};
pub use validation::{CouponValidationRequest, EventValidationRequest, ValidationResult};
