#![allow(dead_code)]
//! 注册表的性能基准测试

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use injection_kit::{Inject, Key, Provided, Registry, RegistryConfig};

/// 测试用的简单服务
#[derive(Clone)]
struct SimpleService {
    value: i32,
}

/// 测试用的复杂服务（包含多个字段）
struct ComplexService {
    id: u64,
    name: String,
    dependencies: Vec<String>,
}

fn quiet_registry() -> Registry {
    Registry::with_config(RegistryConfig::quiet())
}

/// 基准测试：按类型解析
fn bench_resolve_by_type(c: &mut Criterion) {
    let registry = quiet_registry();
    registry.register(SimpleService { value: 42 });

    c.bench_function("resolve_by_type", |b| {
        b.iter(|| black_box(registry.resolve::<SimpleService>()))
    });
}

/// 基准测试：不同数量命名项下的按名称解析
fn bench_resolve_named(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_named");

    for entry_count in [1, 10, 100, 1000].iter() {
        let registry = quiet_registry();
        for i in 0..*entry_count {
            registry.register_named(
                format!("service-{}", i),
                ComplexService {
                    id: i as u64,
                    name: format!("service-{}", i),
                    dependencies: vec!["config".to_string()],
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(entry_count),
            entry_count,
            |b, &entry_count| {
                let name = format!("service-{}", entry_count - 1);
                b.iter(|| black_box(registry.resolve_named::<ComplexService>(&name)))
            },
        );
    }

    group.finish();
}

/// 基准测试：注册覆盖
fn bench_register_overwrite(c: &mut Criterion) {
    let registry = quiet_registry();

    c.bench_function("register_overwrite", |b| {
        let mut value = 0;
        b.iter(|| {
            value += 1;
            registry.register(SimpleService { value });
        })
    });
}

/// 基准测试：提供方更新后使用方读取
fn bench_provide_then_inject(c: &mut Criterion) {
    let registry = quiet_registry();
    let mut provided = Provided::named(&registry, "bench", SimpleService { value: 0 });
    let injected = Inject::<SimpleService>::with_key(&registry, Key::named("bench"));

    c.bench_function("provide_then_inject", |b| {
        let mut value = 0;
        b.iter(|| {
            value += 1;
            provided.set(SimpleService { value });
            black_box(injected.get())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_by_type,
    bench_resolve_named,
    bench_register_overwrite,
    bench_provide_then_inject
);
criterion_main!(benches);
