//! Crawler discovery documents
//!
//! robots.txt allows public pages while keeping crawlers out of the API and
//! dashboard; sitemap.xml lists the public URLs once per supported locale.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use tourbase_i18n::Locale;

use crate::state::AppState;

/// Public paths listed in the sitemap, with change-frequency and priority
/// hints per path
const SITEMAP_PAGES: &[(&str, &str, &str)] = &[
    ("", "daily", "1.0"),
    ("/tours", "daily", "0.9"),
    ("/about", "monthly", "0.5"),
    ("/contact", "monthly", "0.5"),
];

pub async fn robots(State(state): State<AppState>) -> Response {
    let base = state.config().public_base_url.trim_end_matches('/');
    let body = format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /dashboard\n\
         \n\
         Sitemap: {}/sitemap.xml\n",
        base
    );

    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

pub async fn sitemap(State(state): State<AppState>) -> Response {
    let base = state.config().public_base_url.trim_end_matches('/');

    let mut body = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for locale in Locale::ALL {
        for (path, changefreq, priority) in SITEMAP_PAGES {
            body.push_str(&format!(
                "  <url>\n    <loc>{}/{}{}</loc>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
                base, locale, path, changefreq, priority
            ));
        }
    }
    body.push_str("</urlset>\n");

    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}
