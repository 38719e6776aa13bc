//! Host call type definitions
//!
//! This module contains the ocall numbers used by the dispatcher.

/// Ocall numbers
pub const OCALL_SCHED_GETAFFINITY: u32 = 0x100;
pub const OCALL_SCHED_SETAFFINITY: u32 = 0x101;
pub const OCALL_SCHED_YIELD: u32 = 0x102;
pub const OCALL_NCORES: u32 = 0x103;
