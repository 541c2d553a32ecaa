//! HTTP client for the Quadra backend REST API.
//!
//! A single request path ([`client::ApiClient::request`]) handles token
//! attachment, body serialization, and error normalization; the
//! endpoint modules add thin typed wrappers over it. All payload
//! normalization (duck-typed roles, inconsistent collection envelopes)
//! happens in this crate, at the client boundary.

pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod events;
pub mod host_applications;
pub mod payload;

pub use client::{ApiClient, RequestOptions};
pub use config::ApiConfig;
