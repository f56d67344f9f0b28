//! Storefront edge: verifies the `token` session cookie, forwards identity to the page
//! renderer as `x-user-*` headers and redirects visitors away from pages they cannot use.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
