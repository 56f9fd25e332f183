//! Benchmarks for chart rendering and status decoding
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pc_status::chart::{draw_chart, DisplayList, SvgSurface};
use pc_status::protocol::{
    Cpu, CpuCore, Gpu, HistoryEntry, HostStatus, MemoryUsage, ServerMessage, StatusMap, Storage,
};
use pc_status::view::FocusCharts;

fn create_host(cores: usize, history: usize) -> HostStatus {
    let cpu = |offset: usize| Cpu {
        model: "Bench CPU".to_string(),
        cpus: (0..cores)
            .map(|c| CpuCore {
                cpu: ((c + offset) * 7 % 100) as f64,
            })
            .collect(),
    };
    let gpus = vec![Gpu {
        name: "Bench GPU".to_string(),
        usage: 42.0,
        memory: MemoryUsage {
            free: 2 << 30,
            total: 8 << 30,
        },
    }];
    let storages = vec![Storage {
        name: Some("/".to_string()),
        free: 100 << 30,
        total: 500 << 30,
    }];

    HostStatus {
        hostname: format!("bench-{}", cores),
        version: "1.0.0".to_string(),
        os: "Ubuntu 24.04".to_string(),
        cpu: cpu(0),
        ram: MemoryUsage {
            free: 4 << 30,
            total: 16 << 30,
        },
        swap: Some(MemoryUsage {
            free: 1 << 30,
            total: 2 << 30,
        }),
        storages: storages.clone(),
        gpus: gpus.clone(),
        loadavg: Some([0.5, 0.4, 0.3]),
        uptime: 123_456,
        histories: (0..history)
            .map(|i| HistoryEntry {
                cpu: cpu(i),
                ram: MemoryUsage {
                    free: (i as u64 % 8) << 30,
                    total: 16 << 30,
                },
                storages: storages.clone(),
                gpus: gpus.clone(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for cores in [4, 16, 64] {
        let charts = FocusCharts::new(&create_host(cores, 10));
        group.throughput(Throughput::Elements(cores as u64));

        group.bench_function(format!("display_list_{}_cores", cores), |b| {
            let mut list = DisplayList::new();
            b.iter(|| draw_chart(&mut list, black_box(&charts.cpu), 800.0))
        });

        group.bench_function(format!("svg_{}_cores", cores), |b| {
            b.iter(|| {
                let mut svg = SvgSurface::new();
                draw_chart(&mut svg, black_box(&charts.cpu), 800.0);
                svg.finish()
            })
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for hosts in [1, 10, 50] {
        let status: StatusMap = (0..hosts)
            .map(|i| (format!("host-{}", i), create_host(8, 10)))
            .collect();
        let frame = ServerMessage::Status(status).to_json().unwrap();

        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_function(format!("status_{}_hosts", hosts), |b| {
            b.iter(|| ServerMessage::from_json(black_box(&frame)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_decode);
criterion_main!(benches);
