use async_trait::async_trait;

use cinema_catalog::{Seat, Showtime};
use cinema_offer::{Coupon, CouponValidationRequest, Event, EventValidationRequest, ValidationResult};
use cinema_shared::Amount;

use crate::booking::{Booking, BookingRequest};
use crate::CoreResult;

/// Read-only movie/showtime/seat data
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_showtimes(&self, movie_id: i64) -> CoreResult<Vec<Showtime>>;

    async fn list_seats(&self, showtime_id: i64) -> CoreResult<Vec<Seat>>;
}

/// Coupon and event lookup plus the backend's authoritative validation
#[async_trait]
pub trait DiscountDirectory: Send + Sync {
    /// Candidates the backend considers applicable for `order_amount`
    async fn list_applicable_coupons(&self, order_amount: Amount) -> CoreResult<Vec<Coupon>>;

    async fn list_applicable_events(&self, order_amount: Amount) -> CoreResult<Vec<Event>>;

    async fn validate_coupon(&self, request: &CouponValidationRequest) -> CoreResult<ValidationResult>;

    async fn validate_event(&self, request: &EventValidationRequest) -> CoreResult<ValidationResult>;
}

/// Booking persistence owned by the backend
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create_booking(&self, request: &BookingRequest) -> CoreResult<Booking>;

    async fn get_booking(&self, id: i64) -> CoreResult<Option<Booking>>;
}
