//! Message bundle endpoint for browser clients
//!
//! Resolution never fails a request: an unsupported locale folds to the
//! default and a missing bundle serves the baseline. The fallback is logged
//! here rather than swallowed.

use axum::{extract::Path, response::Json};
use serde_json::{json, Value};
use tracing::warn;

use tourbase_i18n::{load_bundle, Locale};

pub async fn messages(Path(code): Path<String>) -> Json<Value> {
    let locale = Locale::resolve(&code);
    let lookup = load_bundle(locale);

    if lookup.fell_back() {
        warn!(requested = %locale, served = %lookup.bundle.locale(), "Message bundle fell back");
    }

    Json(json!({
        "locale": lookup.bundle.locale(),
        "fallback": lookup.fell_back(),
        "messages": lookup.bundle.messages(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new().route("/api/i18n/{locale}", get(messages))
    }

    async fn fetch(uri: &str) -> Value {
        let resp = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_supported_locale_serves_its_bundle() {
        let body = fetch("/api/i18n/de").await;
        assert_eq!(body["locale"], "de");
        assert_eq!(body["fallback"], false);
        assert_eq!(body["messages"]["nav"]["tours"], "Touren");
    }

    #[tokio::test]
    async fn test_unsupported_locale_serves_default() {
        let body = fetch("/api/i18n/ja").await;
        assert_eq!(body["locale"], "en");
        assert_eq!(body["messages"]["nav"]["tours"], "Tours");
    }
}
