use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Decides whether a request origin may make cross-origin calls.
///
/// Requests without an Origin header (same-origin or non-browser clients)
/// are always allowed; otherwise the origin must match the allow-list
/// exactly.
pub fn origin_allowed(origin: Option<&str>, allowed: &[String]) -> bool {
    match origin {
        Some(origin) => allowed.iter().any(|candidate| candidate == origin),
        None => true,
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|origin| origin_allowed(Some(origin), &allowed_origins))
                .unwrap_or(false)
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_allowed() {
        let allowed = vec![
            "http://localhost:8080".to_string(),
            "http://movies.com".to_string(),
        ];

        assert!(origin_allowed(None, &allowed));
        assert!(origin_allowed(Some("http://localhost:8080"), &allowed));
        assert!(origin_allowed(Some("http://movies.com"), &allowed));
        assert!(!origin_allowed(Some("http://evil.example"), &allowed));
        assert!(!origin_allowed(Some("http://movies.com:8080"), &allowed));
        assert!(!origin_allowed(Some("http://localhost"), &allowed));
    }

    #[test]
    fn test_empty_allow_list_denies_all_origins() {
        assert!(!origin_allowed(Some("http://localhost:8080"), &[]));
        assert!(origin_allowed(None, &[]));
    }
}
