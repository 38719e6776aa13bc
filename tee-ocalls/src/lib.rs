//! TEE Ocalls
//!
//! This crate is the scheduling host-call gateway of the trusted runtime.
//! Compartment code asks it for the calling thread's CPU affinity, to apply
//! an affinity mask, to yield, or for the host's core count; the gateway
//! forwards each request to the untrusted host through a single call-out and
//! validates what comes back before handing it to the caller.
//!
//! # Architecture
//!
//! - **Sched**: [`SchedGateway`], the four scheduling operations
//! - **Common**: the shared boundary validation routines
//! - **Config**: gateway configuration
//! - **Core**: raw-ABI handler trait and the ocall dispatcher
//!
//! # Usage
//!
//! ```rust,ignore
//! use tee_ocalls::{GatewayConfig, SchedGateway};
//!
//! let gateway = SchedGateway::new(host, GatewayConfig::default());
//! let mut mask = [0u8; 8];
//! let written = gateway.sched_getaffinity(&mut mask)?;
//! ```

#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
pub mod logging;

pub mod common;
pub mod config;
#[cfg(feature = "alloc")]
pub mod core;
pub mod sched;
pub mod types;

// Re-export commonly used items
pub use common::BoundaryPolicy;
pub use config::{GatewayConfig, TrustedRegion};
#[cfg(feature = "alloc")]
pub use self::core::{OcallArgs, OcallDispatcher, OcallHandler};
pub use sched::SchedGateway;
pub use types::*;

pub use tee_api::{CoreCount, CpuSet, Errno, Error, HostCalls, HostTid, Result};

/// Builds a dispatcher with the scheduling handlers registered
#[cfg(feature = "alloc")]
pub fn init_ocalls<H: HostCalls + 'static>(
    gateway: alloc::sync::Arc<SchedGateway<H>>,
    tids: alloc::sync::Arc<tee_api::HostTidMap>,
) -> OcallDispatcher {
    let mut dispatcher = OcallDispatcher::new();
    sched::register_handlers(&mut dispatcher, gateway, tids);
    ocall_debug!("ocall dispatcher ready with {} handlers", dispatcher.handler_count());
    dispatcher
}
