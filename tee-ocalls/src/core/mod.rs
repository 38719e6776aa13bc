//! Core host-call functionality
//!
//! This module provides the raw-ABI side of the gateway: the handler trait,
//! the argument block and the dispatcher.

pub mod args;
pub mod dispatcher;
pub mod traits;

// Re-export commonly used items
pub use args::OcallArgs;
pub use dispatcher::OcallDispatcher;
pub use traits::OcallHandler;
