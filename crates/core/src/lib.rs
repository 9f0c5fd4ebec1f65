//! SwiftMart Core - Shared domain types.
//!
//! This crate provides the types used across all SwiftMart components:
//! - `storefront` - Server-rendered shop front talking to the SwiftMart backend
//! - `cli` - Command-line tools for seeding and inspecting the backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Cart totals and search filtering live here so they can be tested
//! without a backend.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, emails, products and carts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
