use cinema_catalog::{SeatStatus, SeatType};
use cinema_core::repository::{BookingService, CatalogService, DiscountDirectory};
use cinema_core::{BookingRequest, BookingStatus, CoreError, CustomerContact};
use cinema_offer::{CouponValidationRequest, DiscountRef, EventValidationRequest};
use cinema_store::app_config::BackendConfig;
use cinema_store::BackendClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BackendClient {
    BackendClient::new(&BackendConfig {
        base_url: format!("{}/api/", server.uri()),
        timeout_ms: 2_000,
    })
    .unwrap()
}

#[tokio::test]
async fn test_list_seats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/showtime/7/seats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "seatNumber": "A1", "seatType": "REGULAR", "price": 80000, "status": "AVAILABLE"},
            {"id": 2, "seatNumber": "A2", "seatType": "VIP", "price": null, "status": "BOOKED"}
        ])))
        .mount(&server)
        .await;

    let seats = client(&server).list_seats(7).await.unwrap();

    assert_eq!(seats.len(), 2);
    assert_eq!(seats[1].seat_type, SeatType::Vip);
    assert_eq!(seats[1].status, SeatStatus::Booked);
    assert_eq!(seats[1].price, None);
}

#[tokio::test]
async fn test_missing_showtime_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/showtime/99/seats"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).list_seats(99).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn test_applicable_coupons_passes_order_amount() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/coupon/applicable"))
        .and(query_param("orderAmount", "160000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "code": "SAVE20",
            "type": "PERCENTAGE",
            "discountValue": 20,
            "minimumOrderAmount": 100000,
            "maximumDiscountAmount": 25000,
            "remainingQuantity": 4,
            "status": "ACTIVE"
        }])))
        .mount(&server)
        .await;

    let coupons = client(&server).list_applicable_coupons(160_000).await.unwrap();
    assert_eq!(coupons.len(), 1);
    assert_eq!(coupons[0].code, "SAVE20");
}

#[tokio::test]
async fn test_upstream_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/event/applicable"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).list_applicable_events(50_000).await.unwrap_err();
    assert!(matches!(err, CoreError::UpstreamError(_)));
}

#[tokio::test]
async fn test_validate_coupon() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/coupon/validate"))
        .and(body_partial_json(json!({"couponCode": "SAVE20", "orderAmount": 160000, "userId": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": true,
            "message": "OK",
            "discountAmount": 25000,
            "finalAmount": 135000
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .validate_coupon(&CouponValidationRequest {
            coupon_code: "SAVE20".to_string(),
            order_amount: 160_000,
            user_id: "42".to_string(),
        })
        .await
        .unwrap();

    assert!(result.valid);
    assert_eq!(result.granted_discount(160_000), Some(25_000));
}

#[tokio::test]
async fn test_validate_event_client_error_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/event/validate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Event has ended"})))
        .mount(&server)
        .await;

    let result = client(&server)
        .validate_event(&EventValidationRequest {
            event_id: 3,
            order_amount: 80_000,
            user_id: "42".to_string(),
        })
        .await
        .unwrap();

    assert!(!result.valid);
    assert_eq!(result.message.as_deref(), Some("Event has ended"));
}

#[tokio::test]
async fn test_create_booking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/booking"))
        .and(body_partial_json(json!({
            "userId": "42",
            "showtimeId": 7,
            "totalAmount": 135000,
            "bookingStatus": "PENDING",
            "seatIds": [1, 2],
            "couponCode": "SAVE20"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 501,
            "bookingCode": "BK-501",
            "showtimeId": 7,
            "totalAmount": 135000,
            "bookingStatus": "PENDING",
            "createdAt": "2024-05-01T18:30:00"
        })))
        .mount(&server)
        .await;

    let request = BookingRequest::new(
        "42".to_string(),
        7,
        vec![1, 2],
        135_000,
        CustomerContact {
            name: "Le Van C".into(),
            email: "c@example.com".into(),
            phone: "0987654321".into(),
        },
        Some(DiscountRef::Coupon { code: "SAVE20".to_string() }),
    );

    let booking = client(&server).create_booking(&request).await.unwrap();
    assert_eq!(booking.id, 501);
    assert_eq!(booking.booking_status, BookingStatus::Pending);
    assert!(booking.created_at.is_some());
}

#[tokio::test]
async fn test_get_missing_booking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/booking/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert_eq!(client(&server).get_booking(9).await.unwrap(), None);
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movie/1/showtimes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])).set_delay(std::time::Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = BackendClient::new(&BackendConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_ms: 50,
    })
    .unwrap();

    let err = client.list_showtimes(1).await.unwrap_err();
    assert!(matches!(err, CoreError::UpstreamError(_)));
}
