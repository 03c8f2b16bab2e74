//! Bearer authentication and the employee access gate.
//!
//! Two layers run in sequence on every protected route: token
//! verification (upstream identity provider) followed by the employee
//! gate, which lazily provisions an employee record for first-time
//! principals and denies inactive ones.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, ROLE_ADMIN};
use crate::errors::AppError;

/// Authenticated principal extracted from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub principal: Uuid,
    pub email: String,
    pub role: String,
}

impl CurrentUser {
    /// Check if the identity provider asserted the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Token verification middleware.
///
/// Extracts and validates the bearer token from the Authorization
/// header, then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        principal: claims.sub,
        email: claims.email,
        role: claims.role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Employee access gate middleware.
///
/// Must run after `auth_middleware`. Denies principals whose employee
/// record is inactive; unknown principals are provisioned on the spot.
pub async fn employee_gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    state
        .employee_service
        .authorize(user.principal, &user.email)
        .await?;

    Ok(next.run(request).await)
}

/// Require admin role, returns PermissionDenied error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}
