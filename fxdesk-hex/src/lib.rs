//! # fxdesk Hex
//!
//! Application service layer and HTTP adapter for the fxdesk service.
//!
//! ## Architecture
//!
//! - `service` - Application service (validation and orchestration)
//! - `inbound/` - HTTP adapter (Axum server, rate limiting)
//! - `openapi` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: FxRepository`, allowing
//! different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::FxService;
