//! HTTP surface of the FAQ chat service.

pub mod api;
pub mod metrics;
pub mod state;
