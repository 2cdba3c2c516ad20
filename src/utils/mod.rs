//! Helpers for reading and building A2A messages and tasks.

pub mod message;
pub mod parts;
pub mod task;

pub use message::*;
pub use parts::*;
pub use task::*;
