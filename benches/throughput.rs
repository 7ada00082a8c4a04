use criterion::{criterion_group, criterion_main, Criterion};
use pathtree::router::{RouteOptions, Router};
use std::hint::black_box;

type RouteDef = (&'static str, &'static str, &'static [&'static str]);

const EXAMPLE_ROUTES: &[RouteDef] = &[
    ("/", "root_handler", &["GET"]),
    ("/zoo/animals", "get_animals", &["GET"]),
    ("/zoo/animals", "create_animal", &["POST"]),
    ("/zoo/animals/<id:int>", "get_animal", &["GET"]),
    ("/zoo/animals/<id:int>", "update_animal", &["PUT", "PATCH", "DELETE"]),
    ("/zoo/animals/<name:alpha>", "get_animal_by_name", &["GET"]),
    ("/zoo/animals/<id:int>/toys/<toy_id:uuid>", "animal_toy", &["GET"]),
    (
        "/zoo/<category>/animals/<id:int>/habitats/<habitat_id>/sections/<section_id:int>",
        "habitat_section",
        &["GET"],
    ),
    (
        "/inventory/<warehouse_id>/feeds/<feed_id>/items/<item_id>/batches/<batch_id>",
        "post_item_batch",
        &["POST"],
    ),
    (
        "/complex/<a>/<b>/<c>/<d>/<e>/<f>/<g>/<h>/<i>",
        "complex_many_params",
        &["GET"],
    ),
    ("/zoo/health", "health_check", &["HEAD", "OPTIONS", "TRACE"]),
];

fn build_router() -> Router<str> {
    let mut router = Router::new();
    for (path, handler, methods) in EXAMPLE_ROUTES {
        router
            .add_with(path, *handler, RouteOptions::new().methods(methods.iter().copied()))
            .expect("failed to add route");
    }
    router.finalize().expect("failed to finalize");
    router
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("route_match", |b| {
        let test_paths = [
            ("GET", "/zoo/animals/123"),
            ("GET", "/zoo/animals/123/toys/726a7d33-4bd5-46a3-a02d-37da7b4b029b"),
            ("GET", "/zoo/cats/animals/123/habitats/88/sections/5"),
            ("POST", "/inventory/1/feeds/2/items/3/batches/4"),
            ("GET", "/complex/1/2/3/4/5/6/7/8/9"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.resolve(path, method);
                black_box(&res);
            }
        })
    });

    c.bench_function("route_miss", |b| {
        b.iter(|| {
            let res = router.resolve(black_box("/zoo/animals/123/unknown"), "GET");
            black_box(&res);
        })
    });

    c.bench_function("route_static", |b| {
        b.iter(|| {
            let res = router.resolve(black_box("/zoo/health"), "HEAD");
            black_box(&res);
        })
    });
}

criterion_group!(benches, bench_route_throughput);
criterion_main!(benches);
