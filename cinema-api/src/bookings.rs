use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use cinema_core::{Booking, CustomerContact, UserIdentity};
use cinema_order::{BookingSession, Quote};

use crate::error::AppError;
use crate::middleware::identity::require_user;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub session: BookingSession,
    pub customer: CustomerContact,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: Booking,
    pub quote: Quote,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(create_booking))
        .route("/v1/bookings/{id}", get(get_booking))
        .route_layer(middleware::from_fn(require_user))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let (booking, quote) = state.checkout.submit(req.session, &user, req.customer).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse { booking, quote })))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.checkout.booking(id).await?))
}
