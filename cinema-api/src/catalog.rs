use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use cinema_catalog::{SeatSelection, Showtime};
use cinema_order::SeatView;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/movies/{id}/showtimes", get(list_showtimes))
        .route("/v1/showtimes/{id}/seats", get(seat_map))
}

async fn list_showtimes(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> Result<Json<Vec<Showtime>>, AppError> {
    Ok(Json(state.checkout.showtimes(movie_id).await?))
}

async fn seat_map(
    State(state): State<AppState>,
    Path(showtime_id): Path<i64>,
) -> Result<Json<Vec<SeatView>>, AppError> {
    let seats = state.checkout.seat_map(showtime_id, &SeatSelection::new()).await?;
    Ok(Json(seats))
}
