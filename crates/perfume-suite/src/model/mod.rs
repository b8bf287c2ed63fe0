//! Domain types. Each entity implements [`ActorEntity`](actor_framework::ActorEntity) in its
//! own `*_actor` module; this module holds only data and invariants.

pub mod fulfillment;
pub mod package;
pub mod perfume;
pub mod plant;
pub mod warehouse;

pub use fulfillment::*;
pub use package::*;
pub use perfume::*;
pub use plant::*;
pub use warehouse::*;
