use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use cinema_catalog::Seat;
use cinema_order::{BookingSession, Quote};

use crate::state::AppState;

/// The session handed back to the caller together with its fresh quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: BookingSession,
    pub quote: Quote,
}

#[derive(Debug, Deserialize)]
pub struct ToggleSeatRequest {
    pub session: BookingSession,
    pub seat: Seat,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub session: BookingSession,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/seats/toggle", post(toggle_seat))
        .route("/v1/pricing/quote", post(quote))
}

async fn toggle_seat(State(state): State<AppState>, Json(req): Json<ToggleSeatRequest>) -> Json<SessionResponse> {
    let mut session = req.session;
    session.toggle_seat(&req.seat);
    let quote = session.quote(state.checkout.engine());
    Json(SessionResponse { session, quote })
}

async fn quote(State(state): State<AppState>, Json(req): Json<QuoteRequest>) -> Json<Quote> {
    Json(req.session.quote(state.checkout.engine()))
}
