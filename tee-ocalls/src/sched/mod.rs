//! Scheduling host calls
//!
//! [`SchedGateway`] carries the four scheduling operations across the trust
//! boundary. Each operation performs exactly one call-out; nothing is cached
//! and nothing is retried. Host errors are returned as they were reported.

#[cfg(feature = "alloc")]
mod handlers;

#[cfg(feature = "alloc")]
pub use handlers::{
    register_handlers, GetAffinityHandler, NcoresHandler, SetAffinityHandler, YieldHandler,
};

use tee_api::error::status_to_result;
use tee_api::sched::CPU_SET_BYTES;
use tee_api::{CoreCount, CpuSet, Error, HostCalls, HostTid, Result};

use crate::common::clamp_len;
use crate::config::GatewayConfig;

/// Scheduling host-call gateway
///
/// Holds no mutable state, so one gateway can serve any number of
/// compartment threads at once.
pub struct SchedGateway<H> {
    host: H,
    config: GatewayConfig,
}

impl<H: HostCalls> SchedGateway<H> {
    pub fn new(host: H, config: GatewayConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Copies the calling thread's affinity mask into `dst`.
    ///
    /// Writes `min(dst.len(), CPU_SET_BYTES)` bytes and returns that count;
    /// bytes past it are left untouched. Under `BoundaryPolicy::Reject` an
    /// oversized `dst` fails before the host is called. On failure `dst` is
    /// not modified.
    pub fn sched_getaffinity(&self, dst: &mut [u8]) -> Result<usize> {
        let len = clamp_len(dst.len(), self.config.boundary_policy)?;

        let mut mask = CpuSet::new();
        let ret = self.host.sched_getaffinity(mask.as_bytes_mut());
        ocall_trace!("sched_getaffinity(cpusize={}) = {}", dst.len(), ret);

        let reported = status_to_result(ret)?;
        if reported as usize > CPU_SET_BYTES {
            ocall_warn!("host claims {} affinity bytes, only {} exist", reported, CPU_SET_BYTES);
        }

        dst[..len].copy_from_slice(&mask.as_bytes()[..len]);
        Ok(len)
    }

    /// Full canonical affinity mask of the calling thread
    pub fn affinity(&self) -> Result<CpuSet> {
        let mut mask = CpuSet::new();
        self.sched_getaffinity(mask.as_bytes_mut())?;
        Ok(mask)
    }

    /// Asks the host to apply the affinity image `src` to `host_tid`.
    ///
    /// The bytes are forwarded unmodified, limited to the canonical size.
    /// `host_tid` must come from the trusted [`tee_api::HostTidMap`].
    pub fn sched_setaffinity(&self, host_tid: HostTid, src: &[u8]) -> Result<()> {
        let len = clamp_len(src.len(), self.config.boundary_policy)?;

        let ret = self.host.sched_setaffinity(host_tid, &src[..len]);
        ocall_trace!("sched_setaffinity({}, cpusize={}) = {}", host_tid, src.len(), ret);

        status_to_result(ret).map(|_| ())
    }

    /// Applies a canonical mask to `host_tid`
    pub fn set_affinity(&self, host_tid: HostTid, mask: &CpuSet) -> Result<()> {
        self.sched_setaffinity(host_tid, mask.as_bytes())
    }

    /// Yields the calling thread on the host scheduler
    pub fn sched_yield(&self) {
        ocall_trace!("sched_yield");
        self.host.sched_yield();
    }

    /// Number of logical processors configured on the host.
    ///
    /// A negative host answer is returned as `Error::Host`; zero is a
    /// malformed reply. Counts above `CPU_SETSIZE` are passed through.
    pub fn ncores(&self) -> Result<CoreCount> {
        let ret = self.host.ncores();
        ocall_trace!("ncores = {}", ret);

        let raw = status_to_result(ret)?;
        CoreCount::from_host(raw).ok_or_else(|| {
            ocall_error!("host reported {} cores", raw);
            Error::MalformedReply("zero core count")
        })
    }
}
