//! Simulated host
//!
//! Scheduling state lives in memory: each OS thread that calls in is given
//! a host thread id on first use, with an affinity mask covering every
//! simulated core. Set requests are applied synchronously and intersected
//! with the online cores, the way the Linux scheduler treats them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use hashbrown::HashMap;
use spin::Mutex;
use tee_api::sched::CPU_SET_BYTES;
use tee_api::{CpuSet, Errno, HostCalls, HostTid};

/// First host thread id handed out
const FIRST_HOST_TID: i32 = 1000;

/// Operations whose failure can be injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimOp {
    GetAffinity,
    SetAffinity,
    Ncores,
}

struct SimState {
    ncores: i32,
    next_tid: i32,
    threads: HashMap<thread::ThreadId, i32>,
    masks: HashMap<i32, CpuSet>,
    failures: HashMap<SimOp, Errno>,
}

impl SimState {
    fn online(&self) -> CpuSet {
        CpuSet::all(self.ncores.max(0) as usize)
    }

    fn current_tid(&mut self) -> i32 {
        let id = thread::current().id();
        if let Some(&tid) = self.threads.get(&id) {
            return tid;
        }
        let tid = self.next_tid;
        self.next_tid += 1;
        let online = self.online();
        self.threads.insert(id, tid);
        self.masks.insert(tid, online);
        tid
    }
}

/// In-memory host
pub struct SimHost {
    state: Mutex<SimState>,
    yields: AtomicUsize,
}

impl SimHost {
    /// Creates a host with `ncores` configured processors
    pub fn new(ncores: u32) -> Self {
        Self {
            state: Mutex::new(SimState {
                ncores: ncores.min(i32::MAX as u32) as i32,
                next_tid: FIRST_HOST_TID,
                threads: HashMap::new(),
                masks: HashMap::new(),
                failures: HashMap::new(),
            }),
            yields: AtomicUsize::new(0),
        }
    }

    /// Host thread id of the calling OS thread.
    ///
    /// This is the value the runtime binds in its `HostTidMap` when a
    /// compartment thread starts.
    pub fn current_tid(&self) -> i32 {
        self.state.lock().current_tid()
    }

    /// Gives the calling OS thread the host id `raw`.
    ///
    /// The thread keeps the mask it had; a thread seen for the first time
    /// starts with every online core.
    pub fn set_current_tid(&self, raw: i32) {
        let mut state = self.state.lock();
        let old = state.current_tid();
        if old == raw {
            return;
        }
        let online = state.online();
        let mask = state.masks.remove(&old).unwrap_or(online);
        state.threads.insert(thread::current().id(), raw);
        state.masks.insert(raw, mask);
    }

    /// Drops the calling OS thread's host id and mask, as on thread exit
    pub fn forget_current_thread(&self) -> Option<i32> {
        let mut state = self.state.lock();
        let raw = state.threads.remove(&thread::current().id())?;
        state.masks.remove(&raw);
        Some(raw)
    }

    /// Number of host threads the simulation is tracking
    pub fn thread_count(&self) -> usize {
        self.state.lock().masks.len()
    }

    /// Makes the next call of `op` fail with `errno`
    pub fn fail_next(&self, op: SimOp, errno: Errno) {
        self.state.lock().failures.insert(op, errno);
    }

    /// Overrides the raw value reported by `ncores`, hostile values included
    pub fn set_ncores(&self, raw: i32) {
        self.state.lock().ncores = raw;
    }

    /// Current mask of a host thread
    pub fn mask_of(&self, raw_tid: i32) -> Option<CpuSet> {
        self.state.lock().masks.get(&raw_tid).copied()
    }

    pub fn yield_count(&self) -> usize {
        self.yields.load(Ordering::Relaxed)
    }
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new(thread::available_parallelism().map_or(1, |n| n.get() as u32))
    }
}

impl HostCalls for SimHost {
    fn sched_getaffinity(&self, mask: &mut [u8]) -> i32 {
        let mut state = self.state.lock();
        if let Some(errno) = state.failures.remove(&SimOp::GetAffinity) {
            return errno.as_status();
        }

        let tid = state.current_tid();
        let current = state.masks.get(&tid).copied().unwrap_or_default();
        let len = mask.len().min(CPU_SET_BYTES);
        mask[..len].copy_from_slice(&current.as_bytes()[..len]);
        len as i32
    }

    fn sched_setaffinity(&self, host_tid: HostTid, mask: &[u8]) -> i32 {
        let mut state = self.state.lock();
        if let Some(errno) = state.failures.remove(&SimOp::SetAffinity) {
            return errno.as_status();
        }
        if !state.masks.contains_key(&host_tid.as_raw()) {
            return Errno::ESRCH.as_status();
        }

        let requested = CpuSet::from_bytes(mask);
        let online = state.online();
        let mut applied = CpuSet::new();
        for cpu in requested.iter().filter(|&cpu| online.is_set(cpu)) {
            applied.set(cpu);
        }
        if applied.is_empty() {
            return Errno::EINVAL.as_status();
        }

        #[cfg(feature = "log")]
        log::debug!("sim: {} now runs on {:?}", host_tid, applied);
        state.masks.insert(host_tid.as_raw(), applied);
        0
    }

    fn sched_yield(&self) {
        self.yields.fetch_add(1, Ordering::Relaxed);
        thread::yield_now();
    }

    fn ncores(&self) -> i32 {
        let mut state = self.state.lock();
        match state.failures.remove(&SimOp::Ncores) {
            Some(errno) => errno.as_status(),
            None => state.ncores,
        }
    }
}
