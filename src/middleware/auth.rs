//! Bearer-token authentication extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::db::store::SessionScope;
use crate::errors::AppError;
use crate::models::user::UserRole;
use crate::services::auth as auth_service;
use crate::AppState;

/// Staff member identified by a verified bearer token.
///
/// Use as an Axum extractor in handlers that require a signed-in caller:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    token: String,
}

impl CurrentUser {
    /// Caller identity and session token for per-request data stores.
    pub fn session_scope(&self) -> SessionScope {
        SessionScope {
            user_id: self.id,
            role: self.role.as_str().to_string(),
            token: self.token.clone(),
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized)?;

        let claims = auth_service::verify_token(bearer.token(), &state.config.jwt_secret)?;

        Ok(CurrentUser {
            id: claims.sub,
            username: claims.name,
            role: claims.role,
            token: bearer.token().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_scope_forwards_caller_and_token() {
        let user = CurrentUser {
            id: Uuid::new_v4(),
            username: "editor".to_string(),
            role: UserRole::Editor,
            token: "header.payload.signature".to_string(),
        };

        let scope = user.session_scope();
        assert_eq!(scope.user_id, user.id);
        assert_eq!(scope.role, "Editor");
        assert_eq!(scope.token, "header.payload.signature");
    }
}
