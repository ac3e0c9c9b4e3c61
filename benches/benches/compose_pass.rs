// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_form::composer::Composer;
use understory_form::context::PathContext;
use understory_form::record::Recorder;
use understory_form::simple::{
    SimpleEntity, SimpleModel, SimpleOperation, SimpleParameter, SimpleProperty, SimpleResolver,
    SimpleResult,
};
use understory_form::types::RenderType;

/// One entity with `n` properties cycling through the decision paths, plus `n / 8` operations.
fn wide_model(n: usize) -> SimpleModel {
    let mut entity = SimpleEntity::new("Wide");
    for i in 0..n {
        let name = format!("p{i}");
        let property = match i % 4 {
            0 => SimpleProperty::new(name, "String"),
            1 => SimpleProperty::new(name, "Other").relation(),
            2 => SimpleProperty::new(name, "Other")
                .relation()
                .collection_of("Other"),
            _ => SimpleProperty::new(name, "String").render_as(RenderType::TextArea),
        };
        entity = entity.property(property);
    }
    for i in 0..n / 8 {
        entity = entity.operation(
            SimpleOperation::new(format!("op{i}"))
                .parameter(SimpleParameter::new(0, "a", "String"))
                .parameter(SimpleParameter::new(1, "b", "Other").relation())
                .returns(SimpleResult::new(format!("op{i}"), "Other").relation()),
        );
    }
    SimpleModel::new().with(entity)
}

/// A chain of `depth` entities, each inlining the next.
fn deep_model(depth: usize) -> SimpleModel {
    let mut model = SimpleModel::new();
    for level in 0..depth {
        let mut entity = SimpleEntity::new(format!("Level{level}"))
            .property(SimpleProperty::new("value", "String"));
        if level + 1 < depth {
            let next = format!("Level{}", level + 1);
            entity = entity.property(SimpleProperty::new("next", next.clone()).inline(next));
        }
        model.insert(entity);
    }
    model
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide");
    for &n in &[16usize, 128, 1024] {
        let resolver = SimpleResolver::new(wide_model(n), "Wide");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("compose_n{}", n), |b| {
            b.iter_batched(
                || Composer::new(PathContext::new(), resolver.clone(), Recorder::new()),
                |mut composer| {
                    let report = composer.compose(true);
                    black_box(report)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep");
    for &depth in &[4usize, 32, 128] {
        let resolver = SimpleResolver::new(deep_model(depth), "Level0");
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("compose_inline_depth{}", depth), |b| {
            b.iter_batched(
                || Composer::new(PathContext::new(), resolver.clone(), Recorder::new()),
                |mut composer| {
                    let report = composer.compose(false);
                    black_box(report)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wide, bench_deep);
criterion_main!(benches);
