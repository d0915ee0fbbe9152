use super::jwt::{AuthError, JwtAuth, JwtClaims};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Raw access token of the current request, inserted next to [`JwtClaims`].
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

/// Extract JWT from Authorization header or cookie
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        cookie
                            .trim()
                            .split_once('=')
                            .filter(|(name, value)| *name == "access_token" && !value.is_empty())
                            .map(|(_, value)| value.to_string())
                    })
                })
        })
}

/// JWT authentication middleware
///
/// Accepts access tokens only. On success the decoded [`JwtClaims`] and the
/// raw [`BearerToken`] are inserted into the request extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/hello", get(hello))
///     .route_layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(&headers) else {
        tracing::debug!("No JWT found in Authorization header or cookie");
        return Err(AuthError::MissingToken.into());
    };

    let claims = auth.verify_access_token(&token).map_err(|e| {
        tracing::debug!(error = %e, "JWT verification failed");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}

/// Admin gate; must run after [`jwt_auth_middleware`].
///
/// Layer it first so it ends up inside the authentication layer:
///
/// ```ignore
/// Router::new()
///     .route("/registrations", get(list))
///     .route_layer(axum::middleware::from_fn(require_admin))
///     .route_layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
/// ```
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let Some(claims) = request.extensions().get::<JwtClaims>() else {
        return Err(AuthError::MissingToken.into());
    };

    if !claims.is_admin() {
        tracing::debug!(sub = %claims.sub, "Admin role required");
        return Err(AppError::Forbidden(
            "You do not have permission to perform this action.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
