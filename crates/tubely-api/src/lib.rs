//! Tubely API
//!
//! HTTP surface for the upload pipeline: routes, JWT identity extraction,
//! error responses and server setup. `main.rs` only wires configuration into
//! `setup::initialize_app` and `setup::server::start_server`.

pub mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
