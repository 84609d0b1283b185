//! Application layer - use cases orchestrating domain types and ports.

pub mod services;
