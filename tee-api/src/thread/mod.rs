//! Thread identities on both sides of the boundary
//!
//! Compartment threads are named by [`ThreadId`]; the host scheduler knows
//! them by [`HostTid`]. The two are deliberately unrelated types: the only
//! way to get a `HostTid` is through a [`HostTidMap`], which records the id
//! the host reported when the thread was started.

use core::fmt;

use hashbrown::HashMap;
use spin::RwLock;

/// Compartment-internal thread identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreadId(pub u32);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tid {}", self.0)
    }
}

/// Host scheduler thread identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostTid(i32);

impl HostTid {
    /// Raw id, for the host side of the call only
    pub fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for HostTid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host tid {}", self.0)
    }
}

/// Trusted mapping from compartment threads to host threads
pub struct HostTidMap {
    map: RwLock<HashMap<ThreadId, HostTid>>,
}

impl HostTidMap {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Records the host id of `tid` and returns it.
    ///
    /// `raw` is the value the host reported for the thread when it started.
    /// Rebinding a thread replaces the previous entry.
    pub fn bind(&self, tid: ThreadId, raw: i32) -> HostTid {
        let host_tid = HostTid(raw);
        #[cfg(feature = "log")]
        log::debug!("bind {} -> {}", tid, host_tid);
        self.map.write().insert(tid, host_tid);
        host_tid
    }

    /// Host id of `tid`, if the thread is bound
    pub fn lookup(&self, tid: ThreadId) -> Option<HostTid> {
        self.map.read().get(&tid).copied()
    }

    /// Drops the entry of an exited thread
    pub fn unbind(&self, tid: ThreadId) -> Option<HostTid> {
        self.map.write().remove(&tid)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HostTidMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_lookup_unbind() {
        let map = HostTidMap::new();
        assert!(map.lookup(ThreadId(1)).is_none());

        let host = map.bind(ThreadId(1), 4242);
        assert_eq!(host.as_raw(), 4242);
        assert_eq!(map.lookup(ThreadId(1)), Some(host));
        assert_eq!(map.len(), 1);

        assert_eq!(map.unbind(ThreadId(1)), Some(host));
        assert!(map.is_empty());
    }

    #[test]
    fn test_rebind_replaces() {
        let map = HostTidMap::new();
        map.bind(ThreadId(3), 100);
        let host = map.bind(ThreadId(3), 200);
        assert_eq!(map.lookup(ThreadId(3)), Some(host));
        assert_eq!(map.len(), 1);
    }
}
