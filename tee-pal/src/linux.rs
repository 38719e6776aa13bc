//! Linux host backend

use std::io;

use libc::c_long;
use tee_api::{HostCalls, HostTid};

/// Host calls serviced by the Linux kernel
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxHost;

impl LinuxHost {
    pub fn new() -> Self {
        Self
    }

    /// Kernel thread id of the calling thread
    pub fn gettid() -> i32 {
        // SAFETY: gettid takes no arguments and cannot fail.
        unsafe { libc::syscall(libc::SYS_gettid) as i32 }
    }
}

/// errno of the last failed libc call, never zero
fn last_errno() -> i32 {
    match io::Error::last_os_error().raw_os_error() {
        Some(errno) if errno > 0 => errno,
        _ => libc::EINVAL,
    }
}

/// Folds a libc return value into the host-call status convention
fn to_status(ret: c_long) -> i32 {
    if ret < 0 {
        -last_errno()
    } else {
        ret.min(i32::MAX as c_long) as i32
    }
}

impl HostCalls for LinuxHost {
    fn sched_getaffinity(&self, mask: &mut [u8]) -> i32 {
        let tid = Self::gettid();
        // SAFETY: the kernel writes at most `mask.len()` bytes into `mask`.
        let ret = unsafe {
            libc::syscall(
                libc::SYS_sched_getaffinity,
                tid as libc::pid_t,
                mask.len(),
                mask.as_mut_ptr(),
            )
        };
        #[cfg(feature = "log")]
        log::trace!("host sched_getaffinity({}, {}) = {}", tid, mask.len(), ret);
        to_status(ret)
    }

    fn sched_setaffinity(&self, host_tid: HostTid, mask: &[u8]) -> i32 {
        // SAFETY: the kernel reads at most `mask.len()` bytes from `mask`.
        let ret = unsafe {
            libc::syscall(
                libc::SYS_sched_setaffinity,
                host_tid.as_raw() as libc::pid_t,
                mask.len(),
                mask.as_ptr(),
            )
        };
        #[cfg(feature = "log")]
        log::trace!("host sched_setaffinity({}, {}) = {}", host_tid, mask.len(), ret);
        to_status(ret)
    }

    fn sched_yield(&self) {
        // SAFETY: no arguments; always succeeds on Linux.
        unsafe {
            libc::sched_yield();
        }
    }

    fn ncores(&self) -> i32 {
        // SAFETY: sysconf only reads system configuration.
        let ret = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_CONF) };
        to_status(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tee_api::sched::CPU_SET_BYTES;

    #[test]
    fn test_ncores_positive() {
        assert!(LinuxHost::new().ncores() >= 1);
    }

    #[test]
    fn test_getaffinity_has_a_cpu() {
        let mut mask = [0u8; CPU_SET_BYTES];
        let ret = LinuxHost::new().sched_getaffinity(&mut mask);
        assert!(ret > 0, "sched_getaffinity returned {}", ret);
        assert!(mask.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_to_status_clamps() {
        assert_eq!(to_status(0), 0);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(to_status(c_long::from(i32::MAX) + 1), i32::MAX);
    }
}
