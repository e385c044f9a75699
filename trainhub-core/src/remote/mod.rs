//! Wireless remote connection management

pub mod link;

pub use link::{ConnectionEvent, LinkState, RemoteLink};
