//! Renderers: immutable data in, HTML out.
//!
//! Each renderer is a plain view struct built from domain data plus an
//! askama template that displays it. Templates escape every backend string,
//! so product names and messages cannot inject markup.
//!
//! - [`ProductGrid`] - product cards with an "Add" action each
//! - [`CartPanel`] - cart lines with a "Remove" action each, and the total
//! - [`AuthNav`] - login or logout affordance
//! - [`pages`] - full pages composed from the above

pub mod auth_nav;
pub mod cart_panel;
pub mod pages;
pub mod product_grid;

pub use auth_nav::AuthNav;
pub use cart_panel::{CartLine, CartPanel, CartPanelTemplate};
pub use pages::{HomeTemplate, LoginTemplate, SignupTemplate, flash, flash_text, notice_text};
pub use product_grid::{ProductCard, ProductGrid, ProductGridTemplate};
