use crate::config::RouteConfig;
use crate::geo::Coordinate;
use crate::graph::GraphStore;
use crate::route::cancel::Cancellation;
use crate::route::error::RouteError;
use crate::route::metrics::{Outcome, RouteResult};
use crate::route::resolve::resolve;
use crate::route::search::{AStar, Termination};

use log::{debug, error, info};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Instant;
#[cfg(feature = "tracing")]
use tracing::Level;

/// The public entry point of the routing core.
///
/// The service owns a shared handle to a [`GraphStore`] and the active
/// [`RouteConfig`]. Every query builds its own search state, so a single
/// service can answer any number of queries concurrently.
///
/// ```rust
/// use std::sync::Arc;
/// use waypath::{Coordinate, Network, RouteConfig, RoutingService, VertexId};
///
/// let mut builder = Network::builder();
/// builder
///     .add_vertex(VertexId(1), Coordinate::new(50.0, 8.0))
///     .add_vertex(VertexId(2), Coordinate::new(50.0, 8.001));
/// builder.add_road(VertexId(1), VertexId(2)).unwrap();
///
/// let service = RoutingService::with_store(Arc::new(builder.build()), RouteConfig::default());
/// let result = service.find_route(Coordinate::new(50.0, 8.0), Coordinate::new(50.0, 8.001));
///
/// assert!(result.path_found);
/// assert_eq!(result.path.len(), 2);
/// ```
pub struct RoutingService<G>
where
    G: GraphStore,
{
    store: Option<Arc<G>>,
    config: RouteConfig,
}

impl<G> Debug for RoutingService<G>
where
    G: GraphStore,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingService")
            .field("ready", &self.is_ready())
            .field("config", &self.config)
            .finish()
    }
}

impl<G> RoutingService<G>
where
    G: GraphStore,
{
    /// A service without a graph. Every query reports [`Outcome::NotReady`]
    /// until [`RoutingService::initialise`] is called.
    pub fn new(config: RouteConfig) -> Self {
        Self {
            store: None,
            config,
        }
    }

    pub fn with_store(store: Arc<G>, config: RouteConfig) -> Self {
        Self {
            store: Some(store),
            config,
        }
    }

    pub fn initialise(&mut self, store: Arc<G>) {
        info!("Routing service initialised, store loaded: {}", store.is_loaded());
        self.store = Some(store);
    }

    pub fn is_ready(&self) -> bool {
        self.store.as_ref().is_some_and(|store| store.is_loaded())
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    pub fn store(&self) -> Option<&Arc<G>> {
        self.store.as_ref()
    }

    /// Finds the cheapest route between two coordinates.
    ///
    /// Never fails: an unreachable goal, an unresolvable coordinate, a
    /// missing graph or a failing store all produce a result with
    /// `path_found = false`, distinguished by its [`Outcome`].
    pub fn find_route(&self, start: Coordinate, end: Coordinate) -> RouteResult {
        self.find_route_with(start, end, &Cancellation::default())
    }

    /// As [`RoutingService::find_route`], stopping early once `cancellation` is
    /// signalled. A cancelled query reports [`Outcome::Cancelled`].
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(self, cancellation)))]
    pub fn find_route_with(
        &self,
        start: Coordinate,
        end: Coordinate,
        cancellation: &Cancellation,
    ) -> RouteResult {
        let timer = Instant::now();

        self.prepare(start, end)
            .and_then(|mut search| {
                let termination = search.run(self.config.yield_interval, cancellation)?;
                Ok(self.summarise(&search, termination, timer))
            })
            .unwrap_or_else(|err| self.failure(err, timer))
    }

    /// As [`RoutingService::find_route_with`], yielding to the tokio scheduler
    /// every `yield_interval` expansions.
    #[cfg(feature = "runtime")]
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(self, cancellation)))]
    pub async fn find_route_async(
        &self,
        start: Coordinate,
        end: Coordinate,
        cancellation: &Cancellation,
    ) -> RouteResult {
        let timer = Instant::now();

        let mut search = match self.prepare(start, end) {
            Ok(search) => search,
            Err(err) => return self.failure(err, timer),
        };

        match search
            .run_async(self.config.yield_interval, cancellation)
            .await
        {
            Ok(termination) => self.summarise(&search, termination, timer),
            Err(err) => self.failure(err, timer),
        }
    }

    /// Answers a batch of independent queries in parallel.
    pub fn find_routes(&self, queries: &[(Coordinate, Coordinate)]) -> Vec<RouteResult> {
        queries
            .par_iter()
            .map(|(start, end)| self.find_route(*start, *end))
            .collect()
    }

    /// Resolves both coordinates and seeds a search between them.
    fn prepare(&self, start: Coordinate, end: Coordinate) -> Result<AStar<'_, G>, RouteError> {
        let store = self
            .store
            .as_deref()
            .ok_or(RouteError::ServiceNotReady)?;

        let RouteConfig {
            max_search_distance,
            profile,
            ..
        } = self.config;

        let start_vertex = resolve(store, start, max_search_distance, profile)?;
        let end_vertex = resolve(store, end, max_search_distance, profile)?;

        debug!("Routing {start_vertex} -> {end_vertex}");
        AStar::new(store, start_vertex, end_vertex)
    }

    fn summarise(&self, search: &AStar<'_, G>, termination: Termination, timer: Instant) -> RouteResult {
        let explored = search.nodes_explored();

        let result = match termination {
            Termination::Found(slot) => RouteResult::found(
                search.route(slot),
                explored,
                self.config.average_speed_kmh,
                timer.elapsed(),
            ),
            Termination::Exhausted => {
                RouteResult::not_found(Outcome::NoPath, explored, timer.elapsed())
            }
            Termination::Cancelled => {
                RouteResult::not_found(Outcome::Cancelled, explored, timer.elapsed())
            }
        };

        debug!(
            "Route {} after exploring {} nodes in {:?}",
            result.outcome, result.nodes_explored, result.calculation_time
        );

        result
    }

    fn failure(&self, err: RouteError, timer: Instant) -> RouteResult {
        match err {
            RouteError::ServiceNotReady
            | RouteError::CoordinateUnresolvable { .. }
            | RouteError::NoPathExists => debug!("No route: {err}"),
            _ => error!("Route query failed: {err}"),
        }

        RouteResult::failed(&err, timer.elapsed())
    }
}
