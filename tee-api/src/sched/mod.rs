//! Scheduling types shared across the trust boundary
//!
//! `CpuSet` is the canonical affinity mask. Its byte image is the wire
//! format both sides use: bit `i` set means the thread may run on logical
//! CPU `i`.
//!
//! The mask is stored as 64-bit words the way `cpu_set_t` is, and its byte
//! image is handed to the kernel as is. That image reads as bit `i % 8` of
//! byte `i / 8` only on little-endian targets, so the crate is limited to
//! those.

use core::fmt;
use core::mem::size_of;

use static_assertions::{const_assert, const_assert_eq};

/// Number of CPUs the canonical mask can represent
pub const CPU_SETSIZE: usize = 1024;

/// Byte length of the canonical mask
pub const CPU_SET_BYTES: usize = CPU_SETSIZE / 8;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = CPU_SETSIZE / WORD_BITS;

/// Canonical affinity mask, layout-compatible with Linux `cpu_set_t`
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CpuSet {
    bits: [u64; WORDS],
}

// The host side mirrors this layout; a mismatch is a build error.
const_assert_eq!(size_of::<CpuSet>(), CPU_SET_BYTES);
const_assert_eq!(CPU_SET_BYTES, 128);
const_assert!(cfg!(target_endian = "little"));

impl CpuSet {
    /// Creates an empty mask
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Creates a mask with CPUs `0..ncpus` set
    pub fn all(ncpus: usize) -> Self {
        let mut set = Self::new();
        for cpu in 0..ncpus.min(CPU_SETSIZE) {
            set.set(cpu);
        }
        set
    }

    /// Builds a mask from a wire image.
    ///
    /// At most `CPU_SET_BYTES` bytes are read; missing bytes stay zero.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::new();
        let len = bytes.len().min(CPU_SET_BYTES);
        set.as_bytes_mut()[..len].copy_from_slice(&bytes[..len]);
        set
    }

    /// Marks `cpu` as allowed. Out-of-range CPUs are ignored.
    pub fn set(&mut self, cpu: usize) {
        if cpu < CPU_SETSIZE {
            self.bits[cpu / WORD_BITS] |= 1u64 << (cpu % WORD_BITS);
        }
    }

    /// Marks `cpu` as not allowed
    pub fn clear(&mut self, cpu: usize) {
        if cpu < CPU_SETSIZE {
            self.bits[cpu / WORD_BITS] &= !(1u64 << (cpu % WORD_BITS));
        }
    }

    /// Checks whether `cpu` is allowed
    pub fn is_set(&self, cpu: usize) -> bool {
        cpu < CPU_SETSIZE && self.bits[cpu / WORD_BITS] & (1u64 << (cpu % WORD_BITS)) != 0
    }

    /// Number of allowed CPUs
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Iterates over allowed CPUs in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CPU_SETSIZE).filter(move |&cpu| self.is_set(cpu))
    }

    /// Wire image of the mask
    pub fn as_bytes(&self) -> &[u8; CPU_SET_BYTES] {
        // SAFETY: `CpuSet` is `repr(C)` over `[u64; WORDS]`, exactly
        // CPU_SET_BYTES bytes with no padding, and u8 has alignment 1.
        unsafe { &*(self.bits.as_ptr() as *const [u8; CPU_SET_BYTES]) }
    }

    /// Mutable wire image of the mask
    pub fn as_bytes_mut(&mut self) -> &mut [u8; CPU_SET_BYTES] {
        // SAFETY: as in `as_bytes`; every byte pattern is a valid u64.
        unsafe { &mut *(self.bits.as_mut_ptr() as *mut [u8; CPU_SET_BYTES]) }
    }
}

impl Default for CpuSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CpuSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Number of logical processors configured on the host.
///
/// Only produced after the gateway validated the host's answer, so it is
/// never zero. It may exceed `CPU_SETSIZE`: hosts can configure more
/// processors than the canonical mask names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CoreCount(u32);

impl CoreCount {
    /// Validates a raw count reported by the host
    pub fn from_host(raw: u32) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CoreCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
