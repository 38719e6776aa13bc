//! TEE PAL - Untrusted host side of the scheduling host calls
//!
//! The platform abstraction layer services the call-outs the protected
//! compartment makes through [`tee_api::HostCalls`].
//!
//! - [`LinuxHost`] forwards every call to the Linux kernel.
//! - [`SimHost`] keeps the scheduling state in memory. It backs simulation
//!   mode and the gateway's tests, and can be told to fail or to answer
//!   with values a hostile host might send.

#[cfg(target_os = "linux")]
pub mod linux;
pub mod sim;

#[cfg(target_os = "linux")]
pub use linux::LinuxHost;
pub use sim::{SimHost, SimOp};
