//! Gateway benchmarks

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use core::hint::black_box;

use tee_api::sched::CPU_SET_BYTES;
use tee_api::{HostTidMap, ThreadId};
use tee_ocalls::*;
use tee_pal::SimHost;

fn bench_getaffinity(c: &mut Criterion) {
    let gateway = SchedGateway::new(SimHost::new(64), GatewayConfig::default());
    let mut small = [0u8; 8];
    let mut oversized = [0u8; CPU_SET_BYTES * 4];

    c.bench_function("sched_getaffinity_8", |b| {
        b.iter(|| gateway.sched_getaffinity(black_box(&mut small)))
    });
    c.bench_function("sched_getaffinity_clamped", |b| {
        b.iter(|| gateway.sched_getaffinity(black_box(&mut oversized)))
    });
}

fn bench_setaffinity(c: &mut Criterion) {
    let gateway = SchedGateway::new(SimHost::new(64), GatewayConfig::default());
    let tids = HostTidMap::new();
    let me = tids.bind(ThreadId(1), gateway.host().current_tid());
    let mask = CpuSet::all(32);

    c.bench_function("sched_setaffinity", |b| {
        b.iter(|| gateway.set_affinity(me, black_box(&mask)))
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let gateway = Arc::new(SchedGateway::new(SimHost::new(64), GatewayConfig::default()));
    let tids = Arc::new(HostTidMap::new());
    let dispatcher = init_ocalls(gateway, tids);
    let mut buf = [0u8; CPU_SET_BYTES];
    let get = OcallArgs::with2(buf.len(), buf.as_mut_ptr() as usize);

    c.bench_function("dispatch_getaffinity", |b| {
        b.iter(|| unsafe { dispatcher.dispatch(OCALL_SCHED_GETAFFINITY, black_box(&get)) })
    });
    c.bench_function("dispatch_ncores", |b| {
        b.iter(|| unsafe { dispatcher.dispatch(OCALL_NCORES, black_box(&OcallArgs::empty())) })
    });
}

criterion_group!(gateway_benchmarks, bench_getaffinity, bench_setaffinity, bench_dispatch);

criterion_main!(gateway_benchmarks);
