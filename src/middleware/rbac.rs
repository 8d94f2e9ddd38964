//! Role check for handlers that change site content.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::AppState;

/// Extractor that requires a role allowed to change site content (Admin or Editor).
#[derive(Debug, Clone)]
pub struct RequireEditor(pub CurrentUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.can_edit() {
            return Err(AppError::Forbidden("需要編輯權限".to_string()));
        }
        Ok(RequireEditor(user))
    }
}
