//! HTTP Middleware
//!
//! 状态码错误日志 + 缓存命中日志

use axum::{extract::Request, middleware::Next, response::Response};

use super::handlers::{CACHE_KEY_HEADER, CACHE_ORIGIN_HEADER};

/// 请求日志中间件
///
/// - 4xx / 5xx 状态码记录 warn / error
/// - 资产响应按 `X-Cache-Origin` 记录命中来源
///
/// 业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn cache_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    } else if let Some(origin) = header_str(&response, &CACHE_ORIGIN_HEADER) {
        tracing::debug!(
            uri = %uri.path(),
            key = header_str(&response, &CACHE_KEY_HEADER).unwrap_or("-"),
            origin,
            "Served cached asset"
        );
    }

    response
}

fn header_str<'a>(response: &'a Response, name: &http::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, Request as HttpRequest, StatusCode},
        response::IntoResponse,
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn asset_handler() -> Response {
        (
            [
                (CACHE_KEY_HEADER, HeaderValue::from_static("123_a.jpg")),
                (CACHE_ORIGIN_HEADER, HeaderValue::from_static("disk")),
            ],
            "bytes",
        )
            .into_response()
    }

    async fn not_found_handler() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/asset", get(asset_handler))
            .route("/not-found", get(not_found_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(cache_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_asset_response_passes_through_with_headers() {
        let request = HttpRequest::builder()
            .uri("/asset")
            .body(Body::empty())
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[&CACHE_ORIGIN_HEADER], "disk");
    }

    #[tokio::test]
    async fn test_client_error_passes_through() {
        assert_eq!(status_of("/not-found").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_error_passes_through() {
        assert_eq!(status_of("/error").await, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
