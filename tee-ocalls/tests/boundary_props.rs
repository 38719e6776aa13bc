//! Property tests for the trust-boundary size rules

use proptest::prelude::*;

use tee_api::sched::CPU_SET_BYTES;
use tee_api::{CpuSet, HostTidMap, ThreadId};
use tee_ocalls::common::clamp_len;
use tee_ocalls::{BoundaryPolicy, Error, GatewayConfig, SchedGateway};
use tee_pal::SimHost;

const SENTINEL: u8 = 0xa5;

proptest! {
    #[test]
    fn clamp_never_exceeds_canonical(requested in 0usize..1 << 20) {
        let len = clamp_len(requested, BoundaryPolicy::Clamp).unwrap();
        prop_assert_eq!(len, requested.min(CPU_SET_BYTES));

        match clamp_len(requested, BoundaryPolicy::Reject) {
            Ok(len) => prop_assert!(requested <= CPU_SET_BYTES && len == requested),
            Err(err) => {
                prop_assert!(requested > CPU_SET_BYTES);
                prop_assert_eq!(err.as_status(), -22);
            }
        }
    }

    #[test]
    fn getaffinity_writes_exactly_the_clamped_length(
        ncores in 1u32..=64,
        cpusize in 0usize..=CPU_SET_BYTES * 3,
    ) {
        let gateway = SchedGateway::new(SimHost::new(ncores), GatewayConfig::default());
        let mut dst = vec![SENTINEL; cpusize];

        let written = gateway.sched_getaffinity(&mut dst).unwrap();
        prop_assert_eq!(written, cpusize.min(CPU_SET_BYTES));

        let online = CpuSet::all(ncores as usize);
        prop_assert_eq!(&dst[..written], &online.as_bytes()[..written]);
        prop_assert!(dst[written..].iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn reject_policy_leaves_oversized_buffer_alone(extra in 1usize..=512) {
        let config = GatewayConfig::new().with_boundary_policy(BoundaryPolicy::Reject);
        let gateway = SchedGateway::new(SimHost::new(4), config);
        let mut dst = vec![SENTINEL; CPU_SET_BYTES + extra];

        let is_violation = matches!(
            gateway.sched_getaffinity(&mut dst),
            Err(Error::BoundaryViolation { .. })
        );
        prop_assert!(is_violation);
        prop_assert!(dst.iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn set_then_get_yields_online_intersection(
        ncores in 1u32..=128,
        cpus in proptest::collection::vec(0usize..tee_api::CPU_SETSIZE, 1..16),
    ) {
        let gateway = SchedGateway::new(SimHost::new(ncores), GatewayConfig::default());
        let tids = HostTidMap::new();
        let me = tids.bind(ThreadId(1), gateway.host().current_tid());

        let mut wanted = CpuSet::new();
        let mut expected = CpuSet::new();
        for &cpu in &cpus {
            wanted.set(cpu);
            if cpu < ncores as usize {
                expected.set(cpu);
            }
        }

        let result = gateway.set_affinity(me, &wanted);
        if expected.is_empty() {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(gateway.affinity().unwrap(), expected);
        }
    }
}
