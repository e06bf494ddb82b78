//! Keeps declared Buildkite organization resources in sync with the
//! platform's REST and GraphQL APIs.
//!
//! [`client::BuildkiteClient`] talks to both backends; [`resources`] maps
//! its calls onto a create/read/update/delete/import lifecycle for an
//! external declarative engine.

pub mod auth;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod identity;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::BuildkiteClient;
pub use error::{BuildkiteError, Result};
