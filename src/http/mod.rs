//! HTTP transport layer
//!
//! Provides the external API routing for `/predict` and the metadata endpoints.

pub mod docs;
pub mod handlers;
