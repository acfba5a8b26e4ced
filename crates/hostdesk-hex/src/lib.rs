//! hostdesk-hex: hexagonal booking/order API library (core + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use hostdesk_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
