//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with a moka-backed store)
//! 5. Security headers (CSP, framing, sniffing)
//!
//! Extractors built on the session live here too: [`RequireUser`] guards cart
//! actions and [`CurrentSession`] feeds the auth navigation.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{AuthRejection, CurrentSession, RequireUser};
pub use request_id::request_id_middleware;
pub use security_headers::{ContentSecurityPolicy, security_headers_middleware};
pub use session::{SessionStore, create_session_layer, create_session_store};
