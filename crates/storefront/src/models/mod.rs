//! Domain models for the storefront.
//!
//! Products and carts live in `swiftmart-core`; this module only holds state
//! that is specific to a browser session.

pub mod session;

pub use session::{ClientSession, keys as session_keys};
