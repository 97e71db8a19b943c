use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

/// CORS policy from `CHAT_CORS_ORIGINS`: an explicit origin list when one
/// parses, otherwise any origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_headers(Any).allow_methods(Any);

    let Some(list) = config.cors_allowed_origins.as_deref() else {
        // Wildcard – suitable for development; set CHAT_CORS_ORIGINS in production.
        return layer.allow_origin(Any);
    };

    let origins = parse_origins(list);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// Blank segments are skipped; an empty header value would otherwise match
/// no real origin.
fn parse_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}
