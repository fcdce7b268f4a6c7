use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use cinema_api::{app, AppState};
use cinema_catalog::{PricingEngine, Seat, SeatStatus, SeatType, Showtime};
use cinema_core::repository::{BookingService, CatalogService, DiscountDirectory};
use cinema_core::{Booking, BookingRequest, CoreError, CoreResult};
use cinema_offer::{Coupon, CouponValidationRequest, Event, EventValidationRequest, ValidationResult};
use cinema_order::CheckoutService;
use cinema_shared::Amount;

struct FakeBackend {
    seats: Vec<Seat>,
    coupons_down: bool,
    bookings: Mutex<Vec<BookingRequest>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            seats: vec![
                Seat::new(1, "A1", SeatType::Regular).with_price(80_000.0),
                Seat::new(2, "A2", SeatType::Regular).with_price(80_000.0),
                Seat::new(3, "B1", SeatType::Vip).with_price(0.0),
                Seat::new(4, "B2", SeatType::Regular).with_status(SeatStatus::Booked),
            ],
            coupons_down: false,
            bookings: Mutex::new(Vec::new()),
        }
    }

    fn coupon() -> Coupon {
        serde_json::from_value(json!({
            "id": 1,
            "code": "SAVE20",
            "type": "PERCENTAGE",
            "discountValue": 20,
            "minimumOrderAmount": 100000,
            "maximumDiscountAmount": 25000,
            "remainingQuantity": 10,
            "status": "ACTIVE"
        }))
        .unwrap()
    }
}

#[async_trait]
impl CatalogService for FakeBackend {
    async fn list_showtimes(&self, movie_id: i64) -> CoreResult<Vec<Showtime>> {
        if movie_id != 1 {
            return Err(CoreError::NotFound(format!("movie {}", movie_id)));
        }
        Ok(vec![serde_json::from_value(json!({
            "id": 7,
            "movieId": 1,
            "cinemaName": "Downtown",
            "roomName": "Hall 2",
            "startTime": "2024-06-01T19:00:00"
        }))
        .unwrap()])
    }

    async fn list_seats(&self, _showtime_id: i64) -> CoreResult<Vec<Seat>> {
        Ok(self.seats.clone())
    }
}

#[async_trait]
impl DiscountDirectory for FakeBackend {
    async fn list_applicable_coupons(&self, _order_amount: Amount) -> CoreResult<Vec<Coupon>> {
        if self.coupons_down {
            return Err(CoreError::UpstreamError("coupon service down".to_string()));
        }
        Ok(vec![Self::coupon()])
    }

    async fn list_applicable_events(&self, _order_amount: Amount) -> CoreResult<Vec<Event>> {
        Ok(Vec::new())
    }

    async fn validate_coupon(&self, request: &CouponValidationRequest) -> CoreResult<ValidationResult> {
        Ok(ValidationResult {
            valid: true,
            message: Some("OK".to_string()),
            discount_amount: Some(25_000.0),
            final_amount: Some((request.order_amount - 25_000) as f64),
        })
    }

    async fn validate_event(&self, _request: &EventValidationRequest) -> CoreResult<ValidationResult> {
        Ok(ValidationResult::rejected("Event has ended"))
    }
}

#[async_trait]
impl BookingService for FakeBackend {
    async fn create_booking(&self, request: &BookingRequest) -> CoreResult<Booking> {
        self.bookings.lock().unwrap().push(request.clone());
        Ok(serde_json::from_value(json!({
            "id": 100,
            "bookingCode": "BK-100",
            "showtimeId": request.showtime_id,
            "totalAmount": request.total_amount,
            "bookingStatus": "PENDING"
        }))
        .unwrap())
    }

    async fn get_booking(&self, id: i64) -> CoreResult<Option<Booking>> {
        Ok((id == 100).then(|| {
            serde_json::from_value(json!({
                "id": 100,
                "totalAmount": 135000,
                "bookingStatus": "CONFIRMED"
            }))
            .unwrap()
        }))
    }
}

fn router(backend: Arc<FakeBackend>) -> Router {
    let checkout = CheckoutService::new(backend.clone(), backend.clone(), backend, PricingEngine::default());
    app(AppState::new(checkout))
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn seat_json(id: i64) -> Value {
    json!({"id": id, "seatNumber": format!("A{}", id), "seatType": "REGULAR", "price": 80000, "status": "AVAILABLE"})
}

async fn session_with_two_seats(backend: Arc<FakeBackend>) -> Value {
    let mut session = json!({"showtimeId": 7});
    for id in [1, 2] {
        let (_, body) = call(
            router(backend.clone()),
            post("/v1/seats/toggle", json!({"session": session, "seat": seat_json(id)}), None),
        )
        .await;
        session = body["session"].clone();
    }
    session
}

#[tokio::test]
async fn test_health() {
    let (status, body) = call(router(Arc::new(FakeBackend::new())), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_showtimes_and_missing_movie() {
    let backend = Arc::new(FakeBackend::new());

    let (status, body) = call(router(backend.clone()), get("/v1/movies/1/showtimes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["roomName"], "Hall 2");

    let (status, body) = call(router(backend), get("/v1/movies/2/showtimes")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("movie 2"));
}

#[tokio::test]
async fn test_seat_map_prices_and_categories() {
    let (status, body) = call(router(Arc::new(FakeBackend::new())), get("/v1/showtimes/7/seats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["category"], "REGULAR_AVAILABLE");
    assert_eq!(body[2]["effectivePrice"], 120_000);
    assert_eq!(body[2]["seatNumber"], "B1");
    assert_eq!(body[3]["category"], "BOOKED");
}

#[tokio::test]
async fn test_toggle_and_quote() {
    let backend = Arc::new(FakeBackend::new());
    let session = session_with_two_seats(backend.clone()).await;

    let (status, quote) = call(router(backend), post("/v1/pricing/quote", json!({"session": session}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["seatCount"], 2);
    assert_eq!(quote["subtotal"], 160_000);
    assert_eq!(quote["total"], 160_000);
}

#[tokio::test]
async fn test_toggle_booked_seat_is_noop() {
    let booked = json!({"id": 4, "seatNumber": "B2", "seatType": "REGULAR", "status": "BOOKED"});
    let (status, body) = call(
        router(Arc::new(FakeBackend::new())),
        post("/v1/seats/toggle", json!({"session": {"showtimeId": 7}, "seat": booked}), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["seatCount"], 0);
}

#[tokio::test]
async fn test_applicable_discounts() {
    let (status, body) = call(
        router(Arc::new(FakeBackend::new())),
        get("/v1/discounts/applicable?orderAmount=160000"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coupons"][0]["code"], "SAVE20");

    // Below the coupon minimum: dropped by the local re-check
    let (_, body) = call(
        router(Arc::new(FakeBackend::new())),
        get("/v1/discounts/applicable?orderAmount=50000"),
    )
    .await;
    assert_eq!(body["coupons"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_applicable_discounts_degrade_when_backend_fails() {
    let mut backend = FakeBackend::new();
    backend.coupons_down = true;

    let (status, body) = call(router(Arc::new(backend)), get("/v1/discounts/applicable?orderAmount=160000")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coupons"], json!([]));
    assert_eq!(body["events"], json!([]));
}

#[tokio::test]
async fn test_select_requires_identity() {
    let (status, _) = call(
        router(Arc::new(FakeBackend::new())),
        post("/v1/discounts/select", json!({"session": {"showtimeId": 7}}), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_select_both_is_rejected() {
    let coupon = serde_json::to_value(FakeBackend::coupon()).unwrap();
    let event = json!({"id": 3, "name": "Tuesday", "discountPercentage": 10, "status": "ACTIVE"});
    let (status, _) = call(
        router(Arc::new(FakeBackend::new())),
        post(
            "/v1/discounts/select",
            json!({"session": {"showtimeId": 7}, "coupon": coupon, "event": event}),
            Some("42"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_select_rejected_event_returns_notice() {
    let backend = Arc::new(FakeBackend::new());
    let session = session_with_two_seats(backend.clone()).await;
    let event = json!({"id": 3, "name": "Tuesday", "discountPercentage": 10, "status": "ACTIVE"});

    let (status, body) = call(
        router(backend),
        post("/v1/discounts/select", json!({"session": session, "event": event}), Some("42")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["total"], 160_000);
    assert_eq!(body["quote"]["notice"]["type"], "REJECTED");
    assert_eq!(body["quote"]["notice"]["message"], "Event has ended");
    assert!(body["session"]["discount"]["selectedEvent"].is_null());
}

#[tokio::test]
async fn test_full_booking_flow() {
    let backend = Arc::new(FakeBackend::new());
    let session = session_with_two_seats(backend.clone()).await;
    let coupon = serde_json::to_value(FakeBackend::coupon()).unwrap();

    let (status, selected) = call(
        router(backend.clone()),
        post("/v1/discounts/select", json!({"session": session, "coupon": coupon}), Some("42")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selected["quote"]["discount"], 25_000);
    assert_eq!(selected["quote"]["total"], 135_000);
    assert_eq!(selected["quote"]["appliedDiscount"]["source"], "SERVER");

    let customer = json!({"name": "Pham D", "email": "d@example.com", "phone": "0901112233"});
    let (status, created) = call(
        router(backend.clone()),
        post(
            "/v1/bookings",
            json!({"session": selected["session"], "customer": customer}),
            Some("42"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["booking"]["id"], 100);
    assert_eq!(created["quote"]["total"], 135_000);

    let sent = backend.bookings.lock().unwrap();
    assert_eq!(sent[0].total_amount, 135_000);
    assert_eq!(sent[0].user_id, "42");
    assert_eq!(sent[0].coupon_code.as_deref(), Some("SAVE20"));
}

#[tokio::test]
async fn test_booking_with_no_seats_is_bad_request() {
    let customer = json!({"name": "Pham D", "email": "d@example.com", "phone": "0901112233"});
    let (status, body) = call(
        router(Arc::new(FakeBackend::new())),
        post(
            "/v1/bookings",
            json!({"session": {"showtimeId": 7}, "customer": customer}),
            Some("42"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no seats"));
}

#[tokio::test]
async fn test_get_booking() {
    let backend = Arc::new(FakeBackend::new());

    let mut req = get("/v1/bookings/100");
    req.headers_mut().insert("x-user-id", "42".parse().unwrap());
    let (status, body) = call(router(backend.clone()), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingStatus"], "CONFIRMED");

    let mut req = get("/v1/bookings/5");
    req.headers_mut().insert("x-user-id", "42".parse().unwrap());
    let (status, _) = call(router(backend), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
