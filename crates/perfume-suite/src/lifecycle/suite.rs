use crate::clients::{
    FulfillmentClient, PackageClient, PerfumeClient, PlantClient, WarehouseClient,
};
use crate::config::SuiteConfig;
use crate::dispatch::{DispatchEngine, DispatchStrategies};
use crate::fulfillment_actor::FulfillmentContext;
use crate::rpc::{Gateway, InternalCredential};
use tracing::{error, info};

/// The running perfume suite: every actor spawned and wired, plus the engine and gateway that
/// sit on top of them.
///
/// # Architecture
///
/// - **Plant Actor**: plants from planting to harvest (no dependencies)
/// - **Perfume Actor**: finished perfumes (no dependencies)
/// - **Fulfillment Actor**: production runs; depends on Plant and Perfume
/// - **Warehouse Actor** and **Package Actor**: storage and dispatch state (no dependencies)
/// - **DispatchEngine**: intake and throttled dispatch over Warehouse and Package
/// - **Gateway**: authenticated internal RPC over all of the above
///
/// Every call between components is bounded by `rpc.timeout_ms`: the fulfillment actor's calls
/// to its dependencies, the dispatch engine's calls and the gateway's. The clients on
/// `PerfumeSuite` itself are unbounded, for in-process callers that choose their own limit.
/// A dispatch waits longer than the timeout in total, but each call it makes is bounded.
///
/// # Example
///
/// ```ignore
/// let suite = PerfumeSuite::new(&SuiteConfig::default());
/// let perfumes = suite.fulfillment.produce(request).await?;
/// suite.shutdown().await?;
/// ```
pub struct PerfumeSuite {
    pub plants: PlantClient,
    pub perfumes: PerfumeClient,
    pub fulfillment: FulfillmentClient,
    pub warehouses: WarehouseClient,
    pub packages: PackageClient,
    pub dispatch: DispatchEngine,
    pub gateway: Gateway,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PerfumeSuite {
    /// Spawns every actor with its context and builds the engine and gateway.
    pub fn new(config: &SuiteConfig) -> Self {
        let buffer = config.actors.buffer_size;
        let timeout = config.rpc.timeout();

        // 1. Create actors
        let (plant_actor, plants) = crate::plant_actor::new(buffer);
        let (perfume_actor, perfumes) = crate::perfume_actor::new(buffer);
        let (fulfillment_actor, fulfillment) = crate::fulfillment_actor::new(buffer);
        let (warehouse_actor, warehouses) = crate::warehouse_actor::new(buffer);
        let (package_actor, packages) = crate::package_actor::new(buffer);

        // 2. Start actors with injected context
        let plant_handle = tokio::spawn(plant_actor.run(()));
        let perfume_handle = tokio::spawn(perfume_actor.run(()));
        let warehouse_handle = tokio::spawn(warehouse_actor.run(()));
        let package_handle = tokio::spawn(package_actor.run(()));
        let fulfillment_handle = tokio::spawn(fulfillment_actor.run(FulfillmentContext {
            plants: plants.clone().with_timeout(timeout),
            perfumes: perfumes.clone().with_timeout(timeout),
            default_origin: config.fulfillment.default_origin.clone(),
        }));

        // 3. Services on top of the actors
        let dispatch = DispatchEngine::new(
            packages.clone().with_timeout(timeout),
            warehouses.clone().with_timeout(timeout),
            DispatchStrategies::from(&config.dispatch),
        );
        let gateway = Gateway::new(
            InternalCredential::new(config.rpc.internal_secret.clone()),
            plants.clone().with_timeout(timeout),
            fulfillment.clone().with_timeout(timeout),
            dispatch.clone(),
        );

        info!("Perfume suite started");
        Self {
            plants,
            perfumes,
            fulfillment,
            warehouses,
            packages,
            dispatch,
            gateway,
            handles: vec![
                plant_handle,
                perfume_handle,
                fulfillment_handle,
                warehouse_handle,
                package_handle,
            ],
        }
    }

    /// Drops every client, then waits for each actor to drain its channel and stop.
    ///
    /// The fulfillment actor holds clients of the plant and perfume actors in its context;
    /// they are released when it stops, so the dependency graph stays acyclic and every actor
    /// terminates.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down suite...");

        drop(self.gateway);
        drop(self.dispatch);
        drop(self.fulfillment);
        drop(self.plants);
        drop(self.perfumes);
        drop(self.warehouses);
        drop(self.packages);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Suite shutdown complete.");
        Ok(())
    }
}
