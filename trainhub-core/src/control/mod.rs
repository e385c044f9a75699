//! Top-level control loop
//!
//! [`ControlLoop`] owns every piece of mutable state of the hub: the
//! settings, the press classifier and the remote link. One call to
//! [`ControlLoop::tick`] samples all inputs once and reconciles the
//! outputs.

mod controller;

pub use controller::{ControlLoop, Halt, Step, TickReport};
