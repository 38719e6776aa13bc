//! TEE API - Shared types and host-call interfaces
//!
//! This crate holds the types that both sides of the trust boundary agree on,
//! plus the call-out interface the protected compartment uses to reach the
//! untrusted host.
//!
//! # Architecture
//!
//! - **Error**: host errno values and the gateway error type
//! - **Sched**: the canonical affinity mask and the validated core count
//! - **Thread**: compartment and host thread identities, and the trusted mapping
//! - **Host**: the `HostCalls` call-out trait
//!
//! # Usage
//!
//! ```rust
//! use tee_api::sched::{CpuSet, CPU_SET_BYTES};
//!
//! let mut set = CpuSet::new();
//! set.set(0);
//! assert_eq!(set.as_bytes().len(), CPU_SET_BYTES);
//! assert_eq!(set.as_bytes()[0], 0x01);
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub mod host;
pub mod sched;
pub mod thread;

// Re-export commonly used types
pub use crate::error::{Errno, Error, Result};
pub use crate::host::HostCalls;
#[cfg(feature = "mock")]
pub use crate::host::MockHostCalls;
pub use crate::sched::{CoreCount, CpuSet, CPU_SETSIZE, CPU_SET_BYTES};
pub use crate::thread::{HostTid, HostTidMap, ThreadId};
