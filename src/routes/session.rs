//! Session introspection for the front end.

use axum::Json;
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::middleware::auth::CurrentUser;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// GET /api/v1/session: who the session token belongs to.
pub async fn me(current_user: CurrentUser) -> Json<ApiResponse<SessionResponse>> {
    ApiResponse::success(SessionResponse {
        subject: current_user.subject,
        email: current_user.email,
        name: current_user.name,
        role: current_user.role,
    })
}
