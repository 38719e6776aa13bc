//! Gateway configuration

use crate::common::BoundaryPolicy;

/// Address range of compartment memory
///
/// Raw buffers handed to the ABI entry points must lie inside it, so a
/// forged pointer cannot make the gateway read or write host memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustedRegion {
    base: usize,
    size: usize,
}

impl TrustedRegion {
    pub const fn new(base: usize, size: usize) -> Self {
        Self { base, size }
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Checks that `start..end` lies inside the region
    pub fn contains(&self, start: usize, end: usize) -> bool {
        match self.base.checked_add(self.size) {
            Some(limit) => start >= self.base && start <= end && end <= limit,
            None => false,
        }
    }
}

/// Scheduling gateway configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GatewayConfig {
    /// Handling of buffer claims above the canonical mask size
    pub boundary_policy: BoundaryPolicy,
    /// Compartment memory, checked by the raw-ABI entry points
    pub trusted_region: Option<TrustedRegion>,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    pub fn with_trusted_region(mut self, region: TrustedRegion) -> Self {
        self.trusted_region = Some(region);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.trusted_region, None);
        #[cfg(not(feature = "strict_boundary"))]
        assert_eq!(config.boundary_policy, BoundaryPolicy::Clamp);
        #[cfg(feature = "strict_boundary")]
        assert_eq!(config.boundary_policy, BoundaryPolicy::Reject);
    }

    #[test]
    fn test_builder() {
        let config = GatewayConfig::new()
            .with_boundary_policy(BoundaryPolicy::Reject)
            .with_trusted_region(TrustedRegion::new(0x1000, 0x1000));
        assert_eq!(config.boundary_policy, BoundaryPolicy::Reject);
        let region = config.trusted_region.unwrap();
        assert!(region.contains(0x1000, 0x2000));
        assert!(!region.contains(0x1800, 0x2001));
        assert!(!region.contains(0x0fff, 0x1001));
    }

    #[test]
    fn test_region_wraparound() {
        let region = TrustedRegion::new(usize::MAX - 4, 16);
        assert!(!region.contains(usize::MAX - 4, usize::MAX));
    }
}
