//! corsgate - an HTTP front that serves a browser dashboard behind a
//! validated CORS policy.
//!
//! The policy is loaded from the environment ([`config::Config::from_env`]),
//! checked once at startup, and handed to `tower-http`'s CORS middleware
//! ([`cors::build_cors_layer`]).

pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
