//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod invoices;
pub mod state;

pub use crate::domain::ApiResult;
