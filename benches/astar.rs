use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use waypath::route::search;
use waypath::{Coordinate, Network, RouteConfig, RoutingService, VertexId};
use waypath_fixtures::lattice;

struct LatticeScenario {
    name: &'static str,
    rows: u32,
    cols: u32,
}

const LATTICE_CASES: [LatticeScenario; 3] = [
    LatticeScenario {
        name: "lattice_16x16",
        rows: 16,
        cols: 16,
    },
    LatticeScenario {
        name: "lattice_64x64",
        rows: 64,
        cols: 64,
    },
    LatticeScenario {
        name: "lattice_128x32",
        rows: 128,
        cols: 32,
    },
];

const ORIGIN: (f32, f32) = (47.600, -122.340);
const SPACING: f32 = 0.001;

fn build(rows: u32, cols: u32) -> Network {
    let (vertices, roads) = lattice(rows, cols, ORIGIN, SPACING);

    let mut builder = Network::builder();
    for (id, lat, lng) in vertices {
        builder.add_vertex(VertexId(id), Coordinate::new(lat, lng));
    }

    for (a, b) in roads {
        builder
            .add_road(VertexId(a), VertexId(b))
            .expect("Lattice roads must join known vertices");
    }

    builder.build()
}

fn corner_to_corner(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.significance_level(0.1).sample_size(30);

    LATTICE_CASES.into_iter().for_each(|sc| {
        let network = build(sc.rows, sc.cols);
        let goal = VertexId(sc.rows * sc.cols);

        group.bench_function(format!("corner_to_corner: {}", sc.name), |b| {
            b.iter(|| {
                let (route, _) = search(black_box(&network), VertexId(1), goal)
                    .expect("Search must complete successfully");

                assert_eq!(route.len(), (sc.rows + sc.cols - 1) as usize);
            })
        });
    });

    group.finish();
}

fn find_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_route");
    group.significance_level(0.1).sample_size(30);

    let sc = &LATTICE_CASES[1];
    let service = RoutingService::with_store(Arc::new(build(sc.rows, sc.cols)), RouteConfig::default());

    // Slightly off the first and last vertices, so both ends are snapped.
    let start = Coordinate::new(ORIGIN.0 + 0.0001, ORIGIN.1);
    let end = Coordinate::new(
        ORIGIN.0 + (sc.rows - 1) as f32 * SPACING,
        ORIGIN.1 + (sc.cols - 1) as f32 * SPACING - 0.0001,
    );

    group.bench_function(format!("find_route: {}", sc.name), |b| {
        b.iter(|| {
            let result = service.find_route(black_box(start), black_box(end));
            assert!(result.path_found);
        })
    });

    group.finish();
}

criterion_group!(routing_benches, corner_to_corner, find_route);
criterion_main!(routing_benches);
