//! Unified logging support for tee-ocalls
//!
//! Call sites log through these macros and never need their own `#[cfg]`.
//! With the `log` feature off the arguments are still evaluated for type
//! checking, so values used only in log lines do not trigger warnings.

/// Unified trace-level logging
#[macro_export]
macro_rules! ocall_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)*);
    }};
}

/// Unified debug-level logging
#[macro_export]
macro_rules! ocall_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)*);
    }};
}

/// Unified warn-level logging
#[macro_export]
macro_rules! ocall_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)*);
    }};
}

/// Unified error-level logging
#[macro_export]
macro_rules! ocall_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::error!($($arg)*);
        #[cfg(not(feature = "log"))]
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_accept_arguments() {
        let cpusize = 8usize;
        let status = -22i32;
        ocall_trace!("getaffinity cpusize={}", cpusize);
        ocall_debug!("clamped {} -> {}", cpusize, 8);
        ocall_warn!("host returned {}", status);
        ocall_error!("unreachable {}", status);
    }
}
