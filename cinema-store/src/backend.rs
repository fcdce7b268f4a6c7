use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use cinema_catalog::{Seat, Showtime};
use cinema_core::repository::{BookingService, CatalogService, DiscountDirectory};
use cinema_core::{Booking, BookingRequest, CoreError, CoreResult};
use cinema_offer::{Coupon, CouponValidationRequest, Event, EventValidationRequest, ValidationResult};
use cinema_shared::Amount;

use crate::app_config::BackendConfig;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to {path} failed: {source}")]
    Transport { path: String, source: reqwest::Error },
    #[error("{path} returned {status}: {body}")]
    Status { path: String, status: StatusCode, body: String },
    #[error("{path} returned an unreadable body: {source}")]
    Decode { path: String, source: reqwest::Error },
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<BackendError> for CoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(path) => CoreError::NotFound(path),
            // 4xx on a booking or validation call carries the backend's reason
            BackendError::Status { status, body, .. } if status.is_client_error() => {
                CoreError::ValidationError(body)
            }
            other => CoreError::UpstreamError(other.to_string()),
        }
    }
}

/// Client for the cinema REST backend. Every request is bounded by the
/// configured timeout; a dropped future cancels the request.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| BackendError::Transport {
                path: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<Option<T>, BackendError> {
        let response = request.send().await.map_err(|source| BackendError::Transport {
            path: path.to_string(),
            source,
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<T>()
                .await
                .map(Some)
                .map_err(|source| BackendError::Decode {
                    path: path.to_string(),
                    source,
                }),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::debug!(path, %status, "backend call failed");
                Err(BackendError::Status {
                    path: path.to_string(),
                    status,
                    body,
                })
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, BackendError> {
        self.send(path, self.client.get(self.url(path))).await
    }

    async fn get_required<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        self.get(path).await?.ok_or_else(|| BackendError::NotFound(path.to_string()))
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, BackendError> {
        self.send(path, self.client.post(self.url(path)).json(body))
            .await?
            .ok_or_else(|| BackendError::NotFound(path.to_string()))
    }

    async fn applicable<T: DeserializeOwned>(&self, kind: &str, order_amount: Amount) -> Result<Vec<T>, BackendError> {
        let path = format!("/{}/applicable", kind);
        let request = self
            .client
            .get(self.url(&path))
            .query(&[("orderAmount", order_amount)]);
        Ok(self.send(&path, request).await?.unwrap_or_default())
    }
}

#[async_trait]
impl CatalogService for BackendClient {
    async fn list_showtimes(&self, movie_id: i64) -> CoreResult<Vec<Showtime>> {
        Ok(self.get_required(&format!("/movie/{}/showtimes", movie_id)).await?)
    }

    async fn list_seats(&self, showtime_id: i64) -> CoreResult<Vec<Seat>> {
        Ok(self.get_required(&format!("/showtime/{}/seats", showtime_id)).await?)
    }
}

#[async_trait]
impl DiscountDirectory for BackendClient {
    async fn list_applicable_coupons(&self, order_amount: Amount) -> CoreResult<Vec<Coupon>> {
        Ok(self.applicable("coupon", order_amount).await?)
    }

    async fn list_applicable_events(&self, order_amount: Amount) -> CoreResult<Vec<Event>> {
        Ok(self.applicable("event", order_amount).await?)
    }

    async fn validate_coupon(&self, request: &CouponValidationRequest) -> CoreResult<ValidationResult> {
        match self.post("/coupon/validate", request).await {
            // The backend answers an unknown code with 4xx; treat it as a verdict
            Err(BackendError::Status { status, body, .. }) if status.is_client_error() => {
                Ok(ValidationResult::rejected(rejection_message(&body)))
            }
            other => Ok(other?),
        }
    }

    async fn validate_event(&self, request: &EventValidationRequest) -> CoreResult<ValidationResult> {
        match self.post("/event/validate", request).await {
            Err(BackendError::Status { status, body, .. }) if status.is_client_error() => {
                Ok(ValidationResult::rejected(rejection_message(&body)))
            }
            other => Ok(other?),
        }
    }
}

#[async_trait]
impl BookingService for BackendClient {
    async fn create_booking(&self, request: &BookingRequest) -> CoreResult<Booking> {
        Ok(self.post("/booking", request).await?)
    }

    async fn get_booking(&self, id: i64) -> CoreResult<Option<Booking>> {
        Ok(self.get(&format!("/booking/{}", id)).await?)
    }
}

/// Pull `message` out of a JSON error body, or use the body as-is.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Discount is not valid for this order".to_string()
            } else {
                body.to_string()
            }
        })
}
