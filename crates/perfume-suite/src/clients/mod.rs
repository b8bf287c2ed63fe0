//! Typed clients, one per actor. Each wraps a `ResourceClient<T>`, implements
//! [`ActorClient`](actor_framework::ActorClient) for `get`/`delete`, and recovers the actor's own
//! error type from framework errors.

mod fulfillment_client;
mod package_client;
mod perfume_client;
mod plant_client;
mod warehouse_client;

pub use fulfillment_client::FulfillmentClient;
pub use package_client::PackageClient;
pub use perfume_client::PerfumeClient;
pub use plant_client::PlantClient;
pub use warehouse_client::WarehouseClient;
