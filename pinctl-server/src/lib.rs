//! HTTP transport and configuration for the pinctl server.

pub mod config;
pub mod server;
pub mod wire;
