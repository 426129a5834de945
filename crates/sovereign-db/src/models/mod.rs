//! Database models for persistent storage.

mod action;
mod catalog;
mod planet;

pub use action::*;
pub use catalog::*;
pub use planet::*;
