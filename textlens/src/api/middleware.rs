use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Answer any `OPTIONS` request with a bare 200.
///
/// Real CORS preflights (with `Access-Control-Request-Method`) are handled
/// by the CORS layer before reaching this; this covers the rest so no
/// `OPTIONS` falls through to the 404 fallback.
pub async fn answer_options(request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}
