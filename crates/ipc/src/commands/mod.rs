//! Command types for IPC messages.

mod paint;
mod panel;

pub use paint::*;
pub use panel::*;
