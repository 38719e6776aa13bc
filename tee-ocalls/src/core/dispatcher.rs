//! Host call dispatcher
//!
//! This module routes raw-ABI host calls to their handlers. The dispatcher
//! is filled once at start-up and only read afterwards, so dispatching needs
//! no locking.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;

use tee_api::error::result_to_status;
use tee_api::{Error, Result};

use super::args::OcallArgs;
use super::traits::OcallHandler;

/// Host call dispatcher
pub struct OcallDispatcher {
    /// Registered host call handlers
    handlers: BTreeMap<u32, Box<dyn OcallHandler>>,
}

impl OcallDispatcher {
    /// Create a new host call dispatcher
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a host call handler, replacing any handler under `id`
    pub fn register_handler(&mut self, id: u32, handler: Box<dyn OcallHandler>) {
        ocall_trace!("register ocall {:#x} ({})", id, handler.name());
        self.handlers.insert(id, handler);
    }

    /// Get a host call handler
    pub fn get_handler(&self, id: u32) -> Option<&dyn OcallHandler> {
        self.handlers.get(&id).map(|handler| handler.as_ref())
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch a host call and keep the typed result
    ///
    /// # Safety
    ///
    /// See [`OcallHandler::execute`].
    pub unsafe fn try_dispatch(&self, id: u32, args: &OcallArgs) -> Result<isize> {
        let handler = self.handlers.get(&id).ok_or(Error::NotFound(id))?;
        // SAFETY: forwarded caller contract.
        unsafe { handler.execute(args) }
    }

    /// Dispatch a host call, returning the raw status
    ///
    /// Non-negative on success, `-errno` on failure.
    ///
    /// # Safety
    ///
    /// See [`OcallHandler::execute`].
    pub unsafe fn dispatch(&self, id: u32, args: &OcallArgs) -> isize {
        // SAFETY: forwarded caller contract.
        let result = unsafe { self.try_dispatch(id, args) };
        if let Err(error) = &result {
            ocall_trace!("ocall {:#x} failed: {}", id, error);
        }
        result_to_status(result)
    }
}

impl Default for OcallDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
