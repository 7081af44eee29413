//! A small line-based TCP proxy hosting the plugin.
//!
//! Every connection is one player on a named backend server; the proxy
//! implements the host interfaces so the relay can run end to end.

pub mod connection;
pub mod registry;
pub mod server;

pub use registry::SessionRegistry;
pub use server::ProxyServer;
