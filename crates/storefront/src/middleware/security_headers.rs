//! Security headers middleware for XSS, clickjacking, and sniffing protection.

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Policy used when the configured image origins cannot form a header value.
const FALLBACK_CSP: &str = "default-src 'none'; \
                            script-src 'self' https://unpkg.com; \
                            style-src 'self'; \
                            img-src 'self' data:; \
                            connect-src 'self'; \
                            frame-src 'none'; \
                            object-src 'none'; \
                            base-uri 'self'; \
                            form-action 'self'; \
                            frame-ancestors 'none'";

/// Content Security Policy for every page.
///
/// htmx is loaded from unpkg. Product images come from the storefront, the
/// backend, or the configured image host.
#[derive(Debug, Clone)]
pub struct ContentSecurityPolicy(HeaderValue);

impl ContentSecurityPolicy {
    /// Build the policy, allowing images from `image_origins`.
    #[must_use]
    pub fn new(image_origins: &[String]) -> Self {
        let policy = format!(
            "default-src 'none'; \
             script-src 'self' https://unpkg.com; \
             style-src 'self'; \
             img-src 'self' data: {}; \
             connect-src 'self'; \
             frame-src 'none'; \
             object-src 'none'; \
             base-uri 'self'; \
             form-action 'self'; \
             frame-ancestors 'none'",
            image_origins.join(" ")
        );

        let value = HeaderValue::from_str(&policy).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid image origin in CSP, images limited to self");
            HeaderValue::from_static(FALLBACK_CSP)
        });
        Self(value)
    }

    /// The header value.
    #[must_use]
    pub const fn header_value(&self) -> &HeaderValue {
        &self.0
    }

    #[cfg(test)]
    fn test_unusable_origin_falls_back() {
        let csp = ContentSecurityPolicy::new(&["http://bad\norigin".to_string()]);
        assert_eq!(csp.header_value(), FALLBACK_CSP);
    }
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: same-origin`
/// - `Content-Security-Policy` (see [`ContentSecurityPolicy`])
/// - `Permissions-Policy` denying camera, microphone, geolocation and payment
/// - `Cache-Control: no-store` unless the handler already set one, so cart and
///   login state never come out of a shared cache
pub async fn security_headers_middleware(
    State(csp): State<ContentSecurityPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("same-origin"));
    headers.insert(CONTENT_SECURITY_POLICY, csp.header_value().clone());
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("camera=(), microphone=(), geolocation=(), payment=()"),
    );

    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_headers_applied() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                ContentSecurityPolicy::new(&["http://127.0.0.1:8000".to_string()]),
                security_headers_middleware,
            ));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let headers = response.headers();

        assert_eq!(headers.get(X_FRAME_OPTIONS).unwrap(), "DENY");
        assert_eq!(headers.get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-store");
        let csp = headers.get(CONTENT_SECURITY_POLICY).unwrap().to_str().unwrap();
        assert!(csp.contains("https://unpkg.com"));
        assert!(csp.contains("frame-ancestors 'none'"));
        assert!(csp.contains("img-src 'self' data: http://127.0.0.1:8000;"));
    }

    #[test]
    fn test_unusable_origin_falls_back() {
        let csp = ContentSecurityPolicy::new(&["http://bad\norigin".to_string()]);
        assert_eq!(csp.header_value(), FALLBACK_CSP);
    }
}
