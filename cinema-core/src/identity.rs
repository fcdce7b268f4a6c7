use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// The signed-in user as established by the auth layer in front of this
/// service. Only the id is needed here: it goes into validation and booking
/// calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
}

impl UserIdentity {
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let user_id = raw.trim();
        if user_id.is_empty() {
            return Err(CoreError::IdentityError("empty user id".to_string()));
        }
        if user_id.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(CoreError::IdentityError(format!("malformed user id: {:?}", user_id)));
        }
        Ok(Self { user_id: user_id.to_string() })
    }
}
