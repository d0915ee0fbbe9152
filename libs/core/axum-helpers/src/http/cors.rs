use axum::http::{HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Creates a CORS layer for the configured origins.
///
/// - Methods: GET, POST, PUT, OPTIONS
/// - Headers: Content-Type, Authorization, Accept
/// - Credentials allowed
/// - 1 hour max age
///
/// An empty origin list yields a layer that allows no cross-origin callers.
pub fn create_cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}
