use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity as forwarded by the upstream gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i32,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::BadRequest(format!("Missing {USER_ID_HEADER} header")))?;

        let user_id = header
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<i32>().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Invalid {USER_ID_HEADER} header")))?;

        Ok(CurrentUser { user_id })
    }
}
