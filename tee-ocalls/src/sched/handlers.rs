//! Raw-ABI handlers for the scheduling host calls
//!
//! Argument layouts:
//!
//! | Call | arg0 | arg1 | arg2 | Success value |
//! |---|---|---|---|---|
//! | `OCALL_SCHED_GETAFFINITY` | cpusize | buffer | | `0` |
//! | `OCALL_SCHED_SETAFFINITY` | compartment tid | cpusize | buffer | `0` |
//! | `OCALL_SCHED_YIELD` | | | | `0` |
//! | `OCALL_NCORES` | | | | core count |

use alloc::boxed::Box;
use alloc::sync::Arc;

use tee_api::{Error, HostCalls, HostTidMap, Result, ThreadId};

use super::SchedGateway;
use crate::common::{clamp_len, validate_user_read, validate_user_write};
use crate::core::{OcallArgs, OcallDispatcher, OcallHandler};
use crate::types::{OCALL_NCORES, OCALL_SCHED_GETAFFINITY, OCALL_SCHED_SETAFFINITY, OCALL_SCHED_YIELD};

/// Register scheduling host call handlers
pub fn register_handlers<H: HostCalls + 'static>(
    dispatcher: &mut OcallDispatcher,
    gateway: Arc<SchedGateway<H>>,
    tids: Arc<HostTidMap>,
) {
    dispatcher.register_handler(
        OCALL_SCHED_GETAFFINITY,
        Box::new(GetAffinityHandler {
            gateway: Arc::clone(&gateway),
        }),
    );

    dispatcher.register_handler(
        OCALL_SCHED_SETAFFINITY,
        Box::new(SetAffinityHandler {
            gateway: Arc::clone(&gateway),
            tids,
        }),
    );

    dispatcher.register_handler(
        OCALL_SCHED_YIELD,
        Box::new(YieldHandler {
            gateway: Arc::clone(&gateway),
        }),
    );

    dispatcher.register_handler(OCALL_NCORES, Box::new(NcoresHandler { gateway }));
}

/// sched_getaffinity host call handler
pub struct GetAffinityHandler<H> {
    gateway: Arc<SchedGateway<H>>,
}

impl<H: HostCalls> OcallHandler for GetAffinityHandler<H> {
    unsafe fn execute(&self, args: &OcallArgs) -> Result<isize> {
        let config = self.gateway.config();
        // The slice is formed over the clamped length only.
        let len = clamp_len(args.get(0), config.boundary_policy)?;
        // SAFETY: caller contract of `OcallHandler::execute`.
        let dst = unsafe { validate_user_write(args.get(1), len, config.trusted_region.as_ref())? };

        self.gateway.sched_getaffinity(dst)?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "sched_getaffinity"
    }

    fn id(&self) -> u32 {
        OCALL_SCHED_GETAFFINITY
    }
}

/// sched_setaffinity host call handler
pub struct SetAffinityHandler<H> {
    gateway: Arc<SchedGateway<H>>,
    tids: Arc<HostTidMap>,
}

impl<H: HostCalls> OcallHandler for SetAffinityHandler<H> {
    unsafe fn execute(&self, args: &OcallArgs) -> Result<isize> {
        let config = self.gateway.config();
        let raw_tid = u32::try_from(args.get(0))
            .map_err(|_| Error::BadArgument("thread id out of range"))?;
        let tid = ThreadId(raw_tid);
        let host_tid = self.tids.lookup(tid).ok_or(Error::UnknownThread(raw_tid))?;

        let len = clamp_len(args.get(1), config.boundary_policy)?;
        // SAFETY: caller contract of `OcallHandler::execute`.
        let src = unsafe { validate_user_read(args.get(2), len, config.trusted_region.as_ref())? };

        self.gateway.sched_setaffinity(host_tid, src)?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "sched_setaffinity"
    }

    fn id(&self) -> u32 {
        OCALL_SCHED_SETAFFINITY
    }
}

/// sched_yield host call handler
pub struct YieldHandler<H> {
    gateway: Arc<SchedGateway<H>>,
}

impl<H: HostCalls> OcallHandler for YieldHandler<H> {
    unsafe fn execute(&self, _args: &OcallArgs) -> Result<isize> {
        self.gateway.sched_yield();
        Ok(0)
    }

    fn name(&self) -> &str {
        "sched_yield"
    }

    fn id(&self) -> u32 {
        OCALL_SCHED_YIELD
    }
}

/// ncores host call handler
pub struct NcoresHandler<H> {
    gateway: Arc<SchedGateway<H>>,
}

impl<H: HostCalls> OcallHandler for NcoresHandler<H> {
    unsafe fn execute(&self, _args: &OcallArgs) -> Result<isize> {
        let count = self.gateway.ncores()?;
        Ok(count.get() as isize)
    }

    fn name(&self) -> &str {
        "ncores"
    }

    fn id(&self) -> u32 {
        OCALL_NCORES
    }
}
