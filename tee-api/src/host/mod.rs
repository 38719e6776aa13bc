//! Host call-out module

pub mod interface;

// Re-export commonly used items
pub use interface::*;
