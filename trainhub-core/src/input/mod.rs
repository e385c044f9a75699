//! Operator input
//!
//! Turns the raw hub button level into discrete actions and the remote's
//! held buttons into proposed settings.

pub mod press;
pub mod translate;

pub use press::{ButtonAction, PressClassifier};
pub use translate::{translate, InputTranslator};
