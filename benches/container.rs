use criterion::{criterion_group, criterion_main, Criterion};
use loomi::{value, Args, Blueprint, Container, InstantiateErrorKind, ResolveArgs};

#[inline]
fn container_with_chain(singletons: bool) -> Container {
    let container = Container::new();
    container.set_register_source("bench");

    let mut leaf = Blueprint::leaf(|_: Args| Ok::<_, InstantiateErrorKind>(value(0i32)));
    if singletons {
        leaf = leaf.singleton();
    }
    container.register("f", leaf).unwrap();

    for (name, dep) in [("e", "f"), ("d", "e"), ("c", "d"), ("b", "c"), ("a", "b")] {
        let mut blueprint = Blueprint::new([dep], |args: Args| {
            Ok::<_, InstantiateErrorKind>(value(args.get::<i32>(0)? + 1))
        })
        .depends([dep]);
        if singletons {
            blueprint = blueprint.singleton();
        }
        container.register(name, blueprint).unwrap();
    }

    container
}

fn criterion_benchmark(c: &mut Criterion) {
    let fresh = container_with_chain(false);
    let cached = container_with_chain(true);

    let echo = Container::new();
    echo.set_register_source("bench");
    echo.register(
        "echo",
        Blueprint::new(["sound"], |args: Args| {
            Ok::<_, InstantiateErrorKind>(value(*args.get::<i32>(0)?))
        }),
    )
    .unwrap();
    let echo_args = ResolveArgs::new().insert("echo", "sound", value(1i32));

    c.bench_function("container_new_with_chain", |b| {
        b.iter(|| container_with_chain(false))
    })
    .bench_function("container_resolve_chain", |b| {
        b.iter(|| fresh.resolve("a").unwrap())
    })
    .bench_function("container_resolve_cached_chain", |b| {
        cached.resolve("a").unwrap();
        b.iter(|| cached.resolve("a").unwrap())
    })
    .bench_function("container_resolve_with_args", |b| {
        b.iter(|| echo.resolve_with("echo", &echo_args).unwrap())
    })
    .bench_function("container_deferred_invoke", |b| {
        let deferred = fresh.resolve_deferred("a").unwrap();
        let no_args = ResolveArgs::new();
        b.iter(|| deferred.invoke(&no_args).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
