//! HTTP routes

pub mod cron;
pub mod discovery;
pub mod health;
pub mod i18n;
pub mod tours;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{locale_redirect_middleware, request_context_middleware};
use crate::state::AppState;

/// Build the application router.
///
/// Layer order matters: the locale redirect runs before handlers so page
/// requests are rewritten first, and the request context wraps everything so
/// even redirects carry an `x-request-id`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/robots.txt", get(discovery::robots))
        .route("/sitemap.xml", get(discovery::sitemap))
        .route("/api/cron/emails", get(cron::process_emails))
        .route("/api/i18n/{locale}", get(i18n::messages))
        .route(
            "/api/tenants/{slug}/tours",
            get(tours::list_tours).post(tours::create_tour),
        )
        .route(
            "/api/tenants/{slug}/tours/{key}",
            get(tours::get_tour).patch(tours::update_tour),
        )
        .layer(middleware::from_fn(locale_redirect_middleware))
        .layer(middleware::from_fn(request_context_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
