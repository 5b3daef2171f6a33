//! Typed bindings for the Discord HTTP API and interaction webhook.
//!
//! Three layers:
//! - [`entity`] hydrates raw JSON payloads into typed, nested records,
//!   with polymorphic dispatch for components and interaction responses.
//! - [`client`] issues authenticated REST calls; [`bound`] ties fetched
//!   entities back to the client so mutations read as entity methods.
//! - [`app`] + [`server`] run the signature-verified webhook endpoint and
//!   dispatch command invocations to registered handlers.

pub mod app;
pub mod bound;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod server;
pub mod types;

pub use app::App;
pub use bound::Bound;
pub use client::Client;
pub use config::Config;
pub use error::{Error, Result};
