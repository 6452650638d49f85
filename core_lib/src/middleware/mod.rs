//! Middleware components for the HTTP server

pub mod cors;
pub mod gate;
pub mod logging;
