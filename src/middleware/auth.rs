use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error};

use skillswap_auth::{Identity, TokenError, verify_token};
use skillswap_config::JwtConfig;
use skillswap_core::AppError;

use crate::state::AppState;

/// Extractor for the identity the auth guard attached to the request.
///
/// When the route is not behind [`authenticate`] the extractor runs the same
/// checks itself, so handlers behave identically either way.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let identity = resolve_identity(&parts.headers, &state.jwt_config)?;
        parts.extensions.insert(identity.clone());

        Ok(AuthUser(identity))
    }
}

/// Pulls the raw credential from the request.
///
/// The cookie named by `cookie_name` wins; the `Authorization: Bearer`
/// header is only consulted when the cookie is absent or empty.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Runs the full guard: locate the credential, verify it and derive the identity.
pub fn resolve_identity(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<Identity, AppError> {
    let token = extract_token(headers, &jwt_config.cookie_name).ok_or_else(|| {
        debug!("Request carries no credential");
        AppError::unauthenticated()
    })?;

    match verify_token(&token, jwt_config) {
        Ok(identity) => Ok(identity),
        Err(TokenError::Invalid) => {
            debug!("Credential failed verification");
            Err(AppError::invalid_token())
        }
        Err(TokenError::Unexpected(err)) => {
            error!(error = %err, "Unexpected failure while verifying credential");
            Err(AppError::internal(err))
        }
    }
}

/// Auth guard middleware.
///
/// Attaches the caller's [`Identity`] to the request extensions and runs the
/// next stage, or answers 401/500 without running it.
///
/// ```rust,ignore
/// Router::new()
///     .nest("/api/v1", api_routes)
///     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
/// ```
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = resolve_identity(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
