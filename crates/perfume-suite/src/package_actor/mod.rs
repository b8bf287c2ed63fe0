//! # Package Actor
//!
//! Owns every package and its PACKED → STORED → DELIVERED lifecycle. The dispatch engine
//! drives it through [`PackageCommand`]s:
//!
//! ```rust,ignore
//! let package = packages.intake(warehouse, params).await?;       // capacity checked
//! let ids = packages.claim(5, &ticket).await?;                    // FIFO, exclusive
//! let delivered = packages.deliver(&ticket, ids[..3].to_vec()).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PackageClient;
use crate::model::Package;
use actor_framework::ResourceActor;

/// Creates a new Package actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Package>, PackageClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, PackageClient::new(generic_client))
}
