//! Request middleware: request context and locale routing

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use tourbase_i18n::Locale;

/// Per-request metadata inserted into request extensions.
///
/// The client IP feeds the audit logger on mutations.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub client_ip: Option<String>,
}

/// Middleware that attaches a request ID and client IP to every request and
/// echoes the ID back in the `x-request-id` response header.
pub async fn request_context_middleware(mut req: Request, next: Next) -> Response {
    let headers = req.headers();

    // Client IP from X-Forwarded-For (first entry) or X-Real-IP
    let client_ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|ip| ip.to_string())
        });

    let context = RequestContext {
        request_id: Uuid::new_v4(),
        client_ip,
    };
    let request_id = context.request_id;

    req.extensions_mut().insert(context);

    let mut response = next.run(req).await;

    if let Ok(value) = request_id.to_string().parse() {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Middleware that redirects page requests lacking a locale prefix.
///
/// Every non-asset, non-API request must carry an explicit locale segment;
/// requests without one are redirected (307) to the same path under the
/// locale resolved from `Accept-Language`, falling back to the default.
pub async fn locale_redirect_middleware(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if !needs_locale_prefix(path) {
        return next.run(req).await;
    }

    let locale = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(Locale::from_accept_language)
        .unwrap_or(Locale::DEFAULT);

    let query = req
        .uri()
        .query()
        .map(|q| format!("?{}", q))
        .unwrap_or_default();
    let location = format!("/{}{}{}", locale, path, query);

    (
        StatusCode::TEMPORARY_REDIRECT,
        [(header::LOCATION, location)],
    )
        .into_response()
}

/// Matcher for the locale redirect: excludes API routes, health and
/// discovery endpoints, and any path whose final segment carries a file
/// extension. A path already prefixed with a supported locale passes
/// through untouched.
fn needs_locale_prefix(path: &str) -> bool {
    if path.starts_with("/api/") || path == "/healthz" || path == "/readyz" {
        return false;
    }

    // Asset-like paths: final segment contains a file extension
    if path
        .rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
    {
        return false;
    }

    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or("");
    first_segment.parse::<Locale>().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn test_app() -> Router {
        Router::new()
            .route("/api/ping", get(ok_handler))
            .route("/en/tours", get(ok_handler))
            .route("/healthz", get(ok_handler))
            .layer(middleware::from_fn(locale_redirect_middleware))
            .layer(middleware::from_fn(request_context_middleware))
    }

    #[tokio::test]
    async fn test_page_request_without_prefix_is_redirected() {
        let resp = test_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/tours")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = resp.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/en/tours");
    }

    #[tokio::test]
    async fn test_redirect_honours_accept_language() {
        let resp = test_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/tours")
                    .header("accept-language", "de-DE,de;q=0.9,en;q=0.8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = resp.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/de/tours");
    }

    #[tokio::test]
    async fn test_unsupported_accept_language_falls_back_to_default() {
        let resp = test_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/tours")
                    .header("accept-language", "ja-JP,ja;q=0.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let location = resp.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/en/tours");
    }

    #[tokio::test]
    async fn test_redirect_preserves_query() {
        let resp = test_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/tours?page=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let location = resp.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/en/tours?page=2");
    }

    #[tokio::test]
    async fn test_api_and_prefixed_and_asset_paths_pass_through() {
        for uri in ["/api/ping", "/en/tours", "/healthz"] {
            let resp = test_app()
                .oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "uri {}", uri);
        }

        // File extensions are never redirected, even without a prefix
        let resp = test_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/favicon.ico")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_ne!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_request_id_header_is_set() {
        let resp = test_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(resp.headers().contains_key("x-request-id"));
    }
}
