use axum::{
    extract::{Query, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;

use cinema_core::UserIdentity;
use cinema_offer::{Coupon, DiscountChoice, Event};
use cinema_order::{ApplicableDiscounts, BookingSession};
use cinema_shared::money;

use crate::error::AppError;
use crate::middleware::identity::require_user;
use crate::session::SessionResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicableQuery {
    pub order_amount: f64,
}

/// At most one of `coupon`/`event`; neither clears the current discount.
#[derive(Debug, Deserialize)]
pub struct SelectDiscountRequest {
    pub session: BookingSession,
    #[serde(default)]
    pub coupon: Option<Coupon>,
    #[serde(default)]
    pub event: Option<Event>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/discounts/applicable", get(applicable))
        .merge(
            Router::new()
                .route("/v1/discounts/select", post(select))
                .route_layer(middleware::from_fn(require_user)),
        )
}

async fn applicable(
    State(state): State<AppState>,
    Query(query): Query<ApplicableQuery>,
) -> Json<ApplicableDiscounts> {
    let order_amount = money::sanitize_amount(query.order_amount);
    Json(state.checkout.applicable_discounts(order_amount).await)
}

async fn select(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(req): Json<SelectDiscountRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let choice = match (req.coupon, req.event) {
        (Some(_), Some(_)) => {
            return Err(AppError::ValidationError(
                "a coupon and an event cannot both be selected".to_string(),
            ))
        }
        (Some(coupon), None) => Some(DiscountChoice::Coupon(Some(coupon))),
        (None, Some(event)) => Some(DiscountChoice::Event(Some(event))),
        (None, None) => None,
    };

    let (session, quote) = match choice {
        Some(choice) => state.checkout.select_discount(req.session, choice, &user).await,
        None => {
            let mut session = req.session;
            session.clear_discount();
            let quote = session.quote(state.checkout.engine());
            (session, quote)
        }
    };
    Ok(Json(SessionResponse { session, quote }))
}
