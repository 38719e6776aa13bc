//! Boundary validation shared by every host call
//!
//! Every byte that crosses the trust boundary goes through [`clamp_len`]
//! first, so no transfer can be larger than the canonical mask. The raw-ABI
//! entry points additionally validate buffer addresses before a slice is
//! formed over them.
//!
//! # Security checks
//!
//! 1. Length never exceeds `CPU_SET_BYTES` (clamped or rejected)
//! 2. Pointer is non-null for non-empty buffers
//! 3. `ptr + len` does not overflow
//! 4. The buffer lies inside compartment memory when a region is configured

use tee_api::sched::CPU_SET_BYTES;
use tee_api::{Error, Result};

use crate::config::TrustedRegion;

/// What to do when a caller claims more buffer than the canonical mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Transfer only the canonical size and report that many bytes
    Clamp,
    /// Fail with `Error::BoundaryViolation` before any host call
    Reject,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        if cfg!(feature = "strict_boundary") {
            BoundaryPolicy::Reject
        } else {
            BoundaryPolicy::Clamp
        }
    }
}

/// Number of bytes a transfer of `requested` bytes may move.
///
/// Returns `min(requested, CPU_SET_BYTES)` under [`BoundaryPolicy::Clamp`].
pub fn clamp_len(requested: usize, policy: BoundaryPolicy) -> Result<usize> {
    if requested <= CPU_SET_BYTES {
        return Ok(requested);
    }
    match policy {
        BoundaryPolicy::Clamp => {
            ocall_debug!("clamping {} bytes to canonical {}", requested, CPU_SET_BYTES);
            Ok(CPU_SET_BYTES)
        }
        BoundaryPolicy::Reject => {
            ocall_debug!("rejecting {} bytes, canonical is {}", requested, CPU_SET_BYTES);
            Err(Error::BoundaryViolation {
                requested,
                canonical: CPU_SET_BYTES,
            })
        }
    }
}

fn check_range(ptr: usize, len: usize, region: Option<&TrustedRegion>) -> Result<()> {
    if ptr == 0 {
        return Err(Error::BadAddress);
    }
    let end = ptr.checked_add(len).ok_or(Error::BadAddress)?;
    if let Some(region) = region {
        if !region.contains(ptr, end) {
            ocall_warn!("buffer {:#x}..{:#x} outside trusted region", ptr, end);
            return Err(Error::BadAddress);
        }
    }
    Ok(())
}

/// Validates a raw compartment buffer for reading.
///
/// `len` must already have gone through [`clamp_len`].
///
/// # Safety
///
/// If validation passes, `ptr` must be valid for reads of `len` bytes for
/// `'a` and the memory must not be mutated during that time.
pub unsafe fn validate_user_read<'a>(
    ptr: usize,
    len: usize,
    region: Option<&TrustedRegion>,
) -> Result<&'a [u8]> {
    if len == 0 {
        return Ok(&[]);
    }
    check_range(ptr, len, region)?;
    // SAFETY: range checked above, validity is the caller's contract.
    Ok(unsafe { core::slice::from_raw_parts(ptr as *const u8, len) })
}

/// Validates a raw compartment buffer for writing.
///
/// `len` must already have gone through [`clamp_len`].
///
/// # Safety
///
/// If validation passes, `ptr` must be valid for writes of `len` bytes for
/// `'a` and no other reference to the memory may exist during that time.
pub unsafe fn validate_user_write<'a>(
    ptr: usize,
    len: usize,
    region: Option<&TrustedRegion>,
) -> Result<&'a mut [u8]> {
    if len == 0 {
        return Ok(&mut []);
    }
    check_range(ptr, len, region)?;
    // SAFETY: range checked above, exclusivity is the caller's contract.
    Ok(unsafe { core::slice::from_raw_parts_mut(ptr as *mut u8, len) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_len() {
        assert_eq!(clamp_len(0, BoundaryPolicy::Clamp), Ok(0));
        assert_eq!(clamp_len(8, BoundaryPolicy::Clamp), Ok(8));
        assert_eq!(clamp_len(CPU_SET_BYTES, BoundaryPolicy::Reject), Ok(CPU_SET_BYTES));
        assert_eq!(clamp_len(4096, BoundaryPolicy::Clamp), Ok(CPU_SET_BYTES));
        assert_eq!(
            clamp_len(CPU_SET_BYTES + 1, BoundaryPolicy::Reject),
            Err(Error::BoundaryViolation {
                requested: CPU_SET_BYTES + 1,
                canonical: CPU_SET_BYTES,
            })
        );
    }

    #[test]
    fn test_validate_rejects_null_and_overflow() {
        unsafe {
            assert_eq!(validate_user_read(0, 8, None), Err(Error::BadAddress));
            assert_eq!(validate_user_write(usize::MAX - 2, 8, None), Err(Error::BadAddress));
            assert_eq!(validate_user_read(0, 0, None), Ok(&[][..]));
        }
    }

    #[test]
    fn test_validate_region() {
        let mut buf = [0u8; 16];
        let base = buf.as_mut_ptr() as usize;
        let inside = TrustedRegion::new(base, 16);
        let elsewhere = TrustedRegion::new(base + 64, 16);

        unsafe {
            let slice = validate_user_write(base, 16, Some(&inside)).unwrap();
            slice[0] = 7;
            assert_eq!(validate_user_write(base, 17, Some(&inside)), Err(Error::BadAddress));
            assert_eq!(validate_user_read(base, 4, Some(&elsewhere)), Err(Error::BadAddress));
        }
        assert_eq!(buf[0], 7);
    }
}
