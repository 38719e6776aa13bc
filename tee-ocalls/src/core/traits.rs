//! Host call traits

use tee_api::Result;

use super::args::OcallArgs;

/// Raw-ABI handler for one host call
pub trait OcallHandler: Send + Sync {
    /// Execute the host call.
    ///
    /// Returns the success value of the call; errors are turned into
    /// negative statuses by the dispatcher.
    ///
    /// # Safety
    ///
    /// Arguments that encode a buffer address and length must describe
    /// memory that is valid for that access for the duration of the call.
    unsafe fn execute(&self, args: &OcallArgs) -> Result<isize>;

    /// Get the host call name
    fn name(&self) -> &str;

    /// Get the host call ID
    fn id(&self) -> u32;
}
