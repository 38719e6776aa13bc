//! Host call argument block

/// Raw arguments of one host call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OcallArgs {
    args: [usize; 6],
}

impl OcallArgs {
    /// Creates an argument block from all six slots
    pub const fn new(args: [usize; 6]) -> Self {
        Self { args }
    }

    /// Creates empty arguments
    pub const fn empty() -> Self {
        Self::new([0; 6])
    }

    /// Creates arguments with one argument
    pub const fn with1(arg0: usize) -> Self {
        Self::new([arg0, 0, 0, 0, 0, 0])
    }

    /// Creates arguments with two arguments
    pub const fn with2(arg0: usize, arg1: usize) -> Self {
        Self::new([arg0, arg1, 0, 0, 0, 0])
    }

    /// Creates arguments with three arguments
    pub const fn with3(arg0: usize, arg1: usize, arg2: usize) -> Self {
        Self::new([arg0, arg1, arg2, 0, 0, 0])
    }

    /// Argument in slot `index`; slots past the end read as zero
    pub fn get(&self, index: usize) -> usize {
        self.args.get(index).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.args
    }
}
