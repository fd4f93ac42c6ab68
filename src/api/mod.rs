//! Button REST API integration module.
//!
//! Provides the typed service interface, its HTTP implementation and the wire models.

pub mod client;
#[cfg(test)]
pub mod fake;
pub mod models;
pub mod service;

pub use client::ButtonClient;
pub use models::{Button, ButtonsPage};
pub use service::{ApiError, ButtonService};
