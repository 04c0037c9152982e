//! Async client library for the aaio.io payment API.
//!
//! Provides signed payment-link generation, typed models for balances,
//! orders and withdrawals, and an [`AaioClient`] with one method per API
//! operation.

pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod params;
pub mod tls;
pub mod transport;

pub use client::AaioClient;
pub use config::{AaioConfig, fetch_config};
pub use error::{AaioError, Result};
