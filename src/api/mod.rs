//! HTTP API layer: router, shared context, endpoint handlers, errors.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;
