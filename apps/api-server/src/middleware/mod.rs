//! Middleware modules: errors and request extractors.

pub mod auth;
pub mod error;
pub mod post_access;
