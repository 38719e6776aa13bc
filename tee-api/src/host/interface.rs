//! Host call-out interface
//!
//! Every request that leaves the protected compartment goes through
//! [`HostCalls`]. The methods mirror the raw host ABI: integer statuses,
//! `-errno` on failure, and byte buffers whose length is fixed by the
//! caller. Nothing returned through this trait is trusted by itself; the
//! gateway validates every reply before it reaches compartment code.

use crate::thread::HostTid;

/// Privileged call-outs serviced by the untrusted host
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HostCalls: Send + Sync {
    /// Writes the calling thread's affinity mask into `mask`.
    ///
    /// `mask` is always exactly the canonical mask size. Returns a
    /// non-negative value on success or `-errno`.
    fn sched_getaffinity(&self, mask: &mut [u8]) -> i32;

    /// Applies the affinity image in `mask` to `host_tid`.
    ///
    /// Returns a non-negative value on success or `-errno`.
    fn sched_setaffinity(&self, host_tid: HostTid, mask: &[u8]) -> i32;

    /// Gives up the calling thread's turn on the host scheduler.
    ///
    /// Always succeeds on the host side, so there is nothing to return.
    fn sched_yield(&self);

    /// Number of processors configured on the host, or `-errno`.
    fn ncores(&self) -> i32;
}
