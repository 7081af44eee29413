//! FreeBungeeChat - global chat relay for a multi-server proxy
//!
//! Relays chat between the backend servers of a proxy with configurable
//! formats, bracket markup, regex rules, private messages and ignore lists.

pub mod bridge;
pub mod chat;
pub mod commands;
pub mod common;
pub mod config;
pub mod host;
pub mod markup;
pub mod proxy;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::FreeBungeeChat;
