use axum::{extract::Request, middleware::Next, response::Response};

use cinema_core::UserIdentity;

use crate::error::AppError;

/// Header set by the auth gateway in front of this service
pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolves the caller from `x-user-id` and makes it available to handlers as
/// `Extension<UserIdentity>`.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, AppError> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("missing user identity".to_string()))?;

    let identity = UserIdentity::parse(raw).map_err(|e| AppError::AuthenticationError(e.to_string()))?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
