use std::sync::Arc;

use waypath::config::RouteConfig;
use waypath::{
    Cancellation, Coordinate, Network, Outcome, Profile, RouteResult, RoutingService, VertexId,
};
use waypath_fixtures::{lattice, Fixture, CITY_GRID, SPLIT};

fn network(fixture: &Fixture) -> Network {
    let mut builder = Network::builder();

    for (id, lat, lng) in fixture.vertices {
        builder.add_vertex(VertexId(*id), Coordinate::new(*lat, *lng));
    }
    for (from, to, weight) in fixture.edges {
        builder
            .add_edge(VertexId(*from), VertexId(*to), *weight)
            .expect("Fixture edges must be valid");
    }
    for (a, b) in fixture.roads {
        builder
            .add_road(VertexId(*a), VertexId(*b))
            .expect("Fixture roads must be valid");
    }

    builder.build()
}

fn path(result: &RouteResult) -> Vec<u32> {
    result.path.iter().map(|node| node.vertex.0).collect()
}

#[test_log::test]
fn routes_across_a_city_grid() {
    let service = RoutingService::with_store(Arc::new(network(&CITY_GRID)), RouteConfig::default());

    let result = service.find_route(
        Coordinate::new(38.900, -77.030),
        Coordinate::new(38.903, -77.027),
    );

    assert_eq!(result.outcome, Outcome::Found);
    assert_eq!(path(&result).first(), Some(&1));
    assert_eq!(path(&result).last(), Some(&16));

    // Each step moves one row or one column closer to the goal.
    for pair in result.path.windows(2) {
        let (a, b) = (pair[0].vertex.0 - 1, pair[1].vertex.0 - 1);
        assert!(b == a + 1 || b == a + 4, "{a} -> {b} moves away");
    }

    // A non-decreasing cost along the route, ending in the reported weight.
    assert!(result.path.windows(2).all(|pair| pair[0].g <= pair[1].g));
    assert_eq!(result.path.last().map(|node| node.g), Some(result.total_weight));
}

#[test_log::test]
fn reports_no_path_between_components() {
    let service = RoutingService::with_store(Arc::new(network(&SPLIT)), RouteConfig::default());

    let result = service.find_route(
        Coordinate::new(50.0, 8.000),
        Coordinate::new(50.1, 8.000),
    );

    assert!(!result.path_found);
    assert_eq!(result.outcome, Outcome::NoPath);
    assert_eq!(result.nodes_explored, 4);
}

#[test]
fn profiles_resolve_the_same_network() {
    let store = Arc::new(network(&CITY_GRID));
    let (start, end) = (
        Coordinate::new(38.9004, -77.0300),
        Coordinate::new(38.9020, -77.0276),
    );

    let shortest = RoutingService::with_store(store.clone(), RouteConfig::default())
        .find_route(start, end);
    let fastest = RoutingService::with_store(
        store,
        RouteConfig::default().with_profile(Profile::Fastest),
    )
    .find_route(start, end);

    assert!(shortest.path_found);
    assert_eq!(path(&shortest), path(&fastest));
}

#[test]
fn configuration_from_a_lookup() {
    let config = RouteConfig::from_lookup(|key| match key {
        "WAYPATH_AVERAGE_SPEED_KMH" => Some("25".to_string()),
        "WAYPATH_PROFILE" => Some("Fastest".to_string()),
        _ => None,
    })
    .expect("configuration is valid");

    assert_eq!(config.average_speed_kmh, 25.0);
    assert_eq!(config.profile, Profile::Fastest);
    assert_eq!(config.max_search_distance, RouteConfig::default().max_search_distance);
}

#[test]
fn large_lattice_batch() {
    let (vertices, roads) = lattice(24, 24, (-33.870, 151.200), 0.001);

    let mut builder = Network::builder();
    for (id, lat, lng) in vertices {
        builder.add_vertex(VertexId(id), Coordinate::new(lat, lng));
    }
    for (a, b) in roads {
        builder
            .add_road(VertexId(a), VertexId(b))
            .expect("Lattice roads must be valid");
    }

    let service = RoutingService::with_store(Arc::new(builder.build()), RouteConfig::default());

    let corner = |r: u32, c: u32| {
        Coordinate::new(-33.870 + r as f32 * 0.001, 151.200 + c as f32 * 0.001)
    };

    let queries = [
        (corner(0, 0), corner(23, 23)),
        (corner(23, 0), corner(0, 23)),
        (corner(12, 12), corner(12, 12)),
        (corner(0, 23), corner(23, 23)),
    ];

    let results = service.find_routes(&queries);
    let lengths = results.iter().map(|r| r.path.len()).collect::<Vec<_>>();

    assert!(results.iter().all(|r| r.outcome == Outcome::Found));
    assert_eq!(lengths, vec![47, 47, 1, 24]);
}

#[cfg(feature = "runtime")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_async_queries() {
    let service = Arc::new(RoutingService::with_store(
        Arc::new(network(&CITY_GRID)),
        RouteConfig::default().with_yield_interval(2),
    ));

    let handles = (1..=4u32)
        .map(|row| {
            let service = service.clone();
            tokio::spawn(async move {
                let start = Coordinate::new(38.900, -77.030);
                let end = Coordinate::new(38.900 + (row - 1) as f32 * 0.001, -77.027);
                let cancellation = Cancellation::new();

                service.find_route_async(start, end, &cancellation).await
            })
        })
        .collect::<Vec<_>>();

    for (row, handle) in (1..=4u32).zip(handles) {
        let result = handle.await.expect("Query task must not panic");

        assert_eq!(result.outcome, Outcome::Found);
        assert_eq!(path(&result).last(), Some(&(row * 4)));
    }
}
