//! Configuration types
//!
//! Timing thresholds and behaviour choices of the control loop. The
//! defaults reproduce the stock hub; a board may override them from a
//! `hub.toml` parsed with [`toml::parse_config`].

pub mod toml;
pub mod types;

pub use types::*;
