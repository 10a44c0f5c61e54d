//! DocShare client.
//!
//! Session and data-synchronization layer for the DocShare project/document service:
//! token lifecycle, credentialed transport with a global 401 policy, typed resource
//! clients, and a stale-flagged cache kept consistent by declared mutation invalidations.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod session;
pub mod sync;
pub mod transport;

pub use auth::{on_unauthorized, AuthGateway, Navigator, NoopNavigator};
pub use client::DocshareClient;
pub use config::Config;
pub use errors::ClientError;
pub use session::{Session, SessionStore};
pub use sync::{Decision, HandshakeOutcome, SyncClient};

#[cfg(test)]
mod tests;
