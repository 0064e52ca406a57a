//! CORS headers for browser callers.

use axum::{
    extract::Request,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};

/// Headers browsers may send when invoking the endpoint.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Stamp permissive CORS headers on every response, errors and preflight included.
pub async fn cors_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    response
}
