//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the ports infrastructure must implement, and the post service.

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
