pub mod booking;
pub mod identity;
pub mod repository;

pub use booking::{Booking, BookingRequest, BookingStatus, CustomerContact};
pub use identity::UserIdentity;
pub use repository::{BookingService, CatalogService, DiscountDirectory};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
    #[error("Identity verification failed: {0}")]
    IdentityError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
