//! Error handling for the host-call gateway
//!
//! Host failures are carried as the errno the host reported, untouched.
//! Failures detected locally, before or after the call-out, get their own
//! variants so callers can tell the two apart.

use core::fmt;

/// A positive errno value as reported by the host kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(i32);

impl Errno {
    /// Operation not permitted
    pub const EPERM: Errno = Errno(1);
    /// No such process
    pub const ESRCH: Errno = Errno(3);
    /// Interrupted system call
    pub const EINTR: Errno = Errno(4);
    /// Input/output error
    pub const EIO: Errno = Errno(5);
    /// Bad address
    pub const EFAULT: Errno = Errno(14);
    /// Invalid argument
    pub const EINVAL: Errno = Errno(22);
    /// Function not implemented
    pub const ENOSYS: Errno = Errno(38);

    /// Wraps a raw errno. Non-positive values are not errnos.
    pub const fn new(raw: i32) -> Option<Errno> {
        if raw > 0 { Some(Errno(raw)) } else { None }
    }

    /// The positive errno value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// The negative status a host call returns for this errno.
    pub const fn as_status(self) -> i32 {
        -self.0
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Errno::EPERM => "EPERM",
            Errno::ESRCH => "ESRCH",
            Errno::EINTR => "EINTR",
            Errno::EIO => "EIO",
            Errno::EFAULT => "EFAULT",
            Errno::EINVAL => "EINVAL",
            Errno::ENOSYS => "ENOSYS",
            _ => return write!(f, "errno {}", self.0),
        };
        write!(f, "{} ({})", name, self.0)
    }
}

/// Gateway error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The host call failed; errno exactly as the host reported it
    Host(Errno),
    /// Caller claimed more buffer than the canonical representation holds
    BoundaryViolation {
        /// Bytes the caller asked for
        requested: usize,
        /// Canonical size of the representation
        canonical: usize,
    },
    /// A raw buffer address failed validation
    BadAddress,
    /// The host answered with a value its contract does not allow
    MalformedReply(&'static str),
    /// A raw call argument does not fit its parameter
    BadArgument(&'static str),
    /// Compartment thread has no host identity bound
    UnknownThread(u32),
    /// No handler registered for this call id
    NotFound(u32),
}

impl Error {
    /// Raw negative status for this error.
    ///
    /// Host errors keep their errno; local errors use the errno the host
    /// kernel would have picked for the same fault.
    pub const fn as_status(&self) -> i32 {
        match self {
            Error::Host(errno) => errno.as_status(),
            Error::BoundaryViolation { .. } => Errno::EINVAL.as_status(),
            Error::BadAddress => Errno::EFAULT.as_status(),
            Error::MalformedReply(_) => Errno::EIO.as_status(),
            Error::BadArgument(_) => Errno::EINVAL.as_status(),
            Error::UnknownThread(_) => Errno::ESRCH.as_status(),
            Error::NotFound(_) => Errno::ENOSYS.as_status(),
        }
    }

    /// Returns true if the failure came from the host.
    pub const fn is_host(&self) -> bool {
        matches!(self, Error::Host(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Host(errno) => write!(f, "Host call failed: {}", errno),
            Error::BoundaryViolation { requested, canonical } => write!(
                f,
                "Boundary violation: requested {} bytes, canonical size is {}",
                requested, canonical
            ),
            Error::BadAddress => write!(f, "Bad address"),
            Error::MalformedReply(msg) => write!(f, "Malformed host reply: {}", msg),
            Error::BadArgument(msg) => write!(f, "Bad argument: {}", msg),
            Error::UnknownThread(tid) => write!(f, "No host identity for thread {}", tid),
            Error::NotFound(id) => write!(f, "Host call {} not found", id),
        }
    }
}

impl From<Errno> for Error {
    fn from(errno: Errno) -> Self {
        Error::Host(errno)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for gateway operations
pub type Result<T> = core::result::Result<T, Error>;

/// Interprets a raw host return value.
///
/// Non-negative values are success. Negative values are `-errno` and are
/// returned verbatim as [`Error::Host`]. `i32::MIN` has no errno behind it.
pub fn status_to_result(ret: i32) -> Result<u32> {
    if ret >= 0 {
        return Ok(ret as u32);
    }
    match ret.checked_neg().and_then(Errno::new) {
        Some(errno) => Err(Error::Host(errno)),
        None => Err(Error::MalformedReply("status cannot be negated")),
    }
}

/// Collapses a result into the raw integer status form.
pub fn result_to_status(result: Result<isize>) -> isize {
    match result {
        Ok(value) => value,
        Err(error) => error.as_status() as isize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion() {
        assert_eq!(status_to_result(0), Ok(0));
        assert_eq!(status_to_result(128), Ok(128));
        assert_eq!(status_to_result(-3), Err(Error::Host(Errno::ESRCH)));
        assert_eq!(status_to_result(-1), Err(Error::Host(Errno::EPERM)));
    }

    #[test]
    fn test_unnegatable_status() {
        assert!(matches!(
            status_to_result(i32::MIN),
            Err(Error::MalformedReply(_))
        ));
    }

    #[test]
    fn test_unknown_errno_kept_verbatim() {
        let err = status_to_result(-4095).unwrap_err();
        assert_eq!(err, Error::Host(Errno::new(4095).unwrap()));
        assert_eq!(err.as_status(), -4095);
    }

    #[test]
    fn test_local_error_status() {
        let err = Error::BoundaryViolation { requested: 256, canonical: 128 };
        assert_eq!(err.as_status(), -22);
        assert!(!err.is_host());
        assert_eq!(Error::BadAddress.as_status(), -14);
        assert_eq!(Error::NotFound(7).as_status(), -38);
        assert_eq!(Error::UnknownThread(2).as_status(), -3);
        assert_eq!(Error::BadArgument("tid").as_status(), -22);
        assert_eq!(result_to_status(Ok(5)), 5);
        assert_eq!(result_to_status(Err(Error::Host(Errno::EINVAL))), -22);
    }
}
