use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinema_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg.clone()),
            CoreError::NotFound(msg) => AppError::NotFoundError(msg.clone()),
            CoreError::IdentityError(msg) => AppError::AuthenticationError(msg.clone()),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => match err.downcast_ref::<CoreError>() {
                Some(CoreError::UpstreamError(msg)) => {
                    tracing::error!("Upstream failure: {}", msg);
                    (StatusCode::BAD_GATEWAY, "Backend unavailable".to_string())
                }
                Some(core) => return AppError::from_core(core).into_response(),
                None => {
                    tracing::error!("Internal Server Error: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
                }
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
