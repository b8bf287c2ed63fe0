//! # Suite Lifecycle
//!
//! Starting, wiring and stopping the actors of the suite, and the tracing setup.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies when started (`run(context)`), so
//! the fulfillment actor can hold clients of the plant and perfume actors created next to it:
//!
//! ```rust,ignore
//! let (plant_actor, plants) = plant_actor::new(32);
//! let (fulfillment_actor, fulfillment) = fulfillment_actor::new(32);
//! tokio::spawn(plant_actor.run(()));
//! tokio::spawn(fulfillment_actor.run(FulfillmentContext { plants: plants.clone(), .. }));
//! ```
//!
//! ## Shutdown
//!
//! Dropping every client closes the channels; each actor finishes the messages it already
//! holds and exits. [`PerfumeSuite::shutdown`] does this and waits for the tasks.
//!
//! ## Tracing
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod suite;
mod tracing;

pub use self::tracing::setup_tracing;
pub use suite::PerfumeSuite;
